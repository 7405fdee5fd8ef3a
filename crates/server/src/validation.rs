//! Request schemas and the checks that turn them into typed commands.
//!
//! Every handler receives an explicit request struct, calls its `validate`
//! method and only then touches a utility crate. Validation has no side
//! effects; a failure names the offending field so clients can point at it.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use imaging::{supported_formats, ImageFormat, ResizeOptions};
use serde::Deserialize;
use text::{supported_algorithms, supported_encodings, Encoding, HashAlgorithm};

use crate::config::Limits;
use crate::upload::UploadedFile;

const DEFAULT_ALGORITHM: &str = "md5";
const DEFAULT_ENCODING: &str = "base64";

/// Rejection produced before any transformation runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("unsupported {field} '{value}', expected one of: {}", .supported.join(", "))]
    Unsupported {
        field: &'static str,
        value: String,
        supported: Vec<String>,
    },

    #[error("{field} is {actual} bytes, limit is {limit} bytes")]
    TooLarge {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("request body exceeds the configured limit")]
    BodyTooLarge,

    #[error("malformed request: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Name of the request field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Missing { field }
            | ValidationError::Invalid { field, .. }
            | ValidationError::Unsupported { field, .. }
            | ValidationError::TooLarge { field, .. } => Some(*field),
            ValidationError::BodyTooLarge | ValidationError::Malformed(_) => None,
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    fn unsupported(field: &'static str, value: &str, supported: &[&str]) -> Self {
        ValidationError::Unsupported {
            field,
            value: value.to_string(),
            supported: supported.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// -- Text ----------------------------------------------------------------

/// Body of `POST /text/hash`.
#[derive(Debug, Default, Deserialize)]
pub struct HashRequest {
    pub text: Option<String>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCommand {
    pub text: String,
    pub algorithm: HashAlgorithm,
}

impl HashRequest {
    pub fn validate(self, limits: &Limits) -> Result<HashCommand, ValidationError> {
        let text = required_text(self.text, limits)?;
        let requested = self.algorithm.as_deref().unwrap_or(DEFAULT_ALGORITHM);
        let algorithm = requested.parse::<HashAlgorithm>().map_err(|_| {
            ValidationError::unsupported("algorithm", requested, supported_algorithms())
        })?;
        Ok(HashCommand { text, algorithm })
    }
}

/// Body of `POST /text/encode` and `POST /text/decode`.
#[derive(Debug, Default, Deserialize)]
pub struct EncodeRequest {
    pub text: Option<String>,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    pub text: String,
    pub encoding: Encoding,
}

impl EncodeRequest {
    pub fn validate(self, limits: &Limits) -> Result<EncodeCommand, ValidationError> {
        let text = required_text(self.text, limits)?;
        let requested = self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING);
        let encoding = requested.parse::<Encoding>().map_err(|_| {
            ValidationError::unsupported("encoding", requested, supported_encodings())
        })?;
        Ok(EncodeCommand { text, encoding })
    }
}

fn required_text(text: Option<String>, limits: &Limits) -> Result<String, ValidationError> {
    let text = text.ok_or(ValidationError::Missing { field: "text" })?;
    if text.trim().is_empty() {
        return Err(ValidationError::invalid("text", "must not be empty"));
    }
    if text.len() > limits.max_text_bytes {
        return Err(ValidationError::TooLarge {
            field: "text",
            limit: limits.max_text_bytes,
            actual: text.len(),
        });
    }
    Ok(text)
}

// -- Image ---------------------------------------------------------------

/// Options shared by the JSON and multipart image endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ImageParams {
    /// Output format for resize.
    pub format: Option<String>,
    /// Output format for convert.
    pub target_format: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub maintain_aspect_ratio: Option<bool>,
}

/// Body of the JSON image endpoints. `image_data` is base64, optionally
/// wrapped in a `data:` URL.
#[derive(Debug, Default, Deserialize)]
pub struct ImageRequest {
    pub image_data: Option<String>,
    #[serde(flatten)]
    pub params: ImageParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeCommand {
    pub image: Vec<u8>,
    pub options: ResizeOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertCommand {
    pub image: Vec<u8>,
    pub target: ImageFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCommand {
    pub image: Vec<u8>,
}

impl ImageRequest {
    pub fn into_resize(self, limits: &Limits) -> Result<ResizeCommand, ValidationError> {
        let image = decode_image_data(self.image_data, limits)?;
        self.params.resize(image, limits)
    }

    pub fn into_convert(self, limits: &Limits) -> Result<ConvertCommand, ValidationError> {
        let image = decode_image_data(self.image_data, limits)?;
        self.params.convert(image)
    }

    pub fn into_info(self, limits: &Limits) -> Result<InfoCommand, ValidationError> {
        let image = decode_image_data(self.image_data, limits)?;
        Ok(InfoCommand { image })
    }
}

impl ImageParams {
    /// Read options from multipart text fields.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let text = |name: &str| {
            fields
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            format: text("format"),
            target_format: text("target_format"),
            width: text("width").map(|v| parse_int("width", &v)).transpose()?,
            height: text("height").map(|v| parse_int("height", &v)).transpose()?,
            maintain_aspect_ratio: text("maintain_aspect_ratio")
                .map(|v| parse_bool("maintain_aspect_ratio", &v))
                .transpose()?,
        })
    }

    pub fn resize(&self, image: Vec<u8>, limits: &Limits) -> Result<ResizeCommand, ValidationError> {
        let width = dimension("width", self.width, limits)?;
        let height = dimension("height", self.height, limits)?;

        let mut options = if self.maintain_aspect_ratio.unwrap_or(true) {
            ResizeOptions::fit(width, height)
        } else {
            ResizeOptions::exact(width, height)
        };
        if let Some(format) = self.format.as_deref() {
            options = options.with_format(image_format("format", format)?);
        }

        Ok(ResizeCommand { image, options })
    }

    pub fn convert(&self, image: Vec<u8>) -> Result<ConvertCommand, ValidationError> {
        let requested = self
            .target_format
            .as_deref()
            .ok_or(ValidationError::Missing {
                field: "target_format",
            })?;
        let target = image_format("target_format", requested)?;
        Ok(ConvertCommand { image, target })
    }
}

fn decode_image_data(data: Option<String>, limits: &Limits) -> Result<Vec<u8>, ValidationError> {
    let data = data.ok_or(ValidationError::Missing {
        field: "image_data",
    })?;

    let payload = match data.trim().strip_prefix("data:") {
        Some(url) => url
            .split_once(',')
            .map(|(_, body)| body)
            .ok_or_else(|| ValidationError::invalid("image_data", "is not a valid data URL"))?,
        None => data.trim(),
    };
    if payload.is_empty() {
        return Err(ValidationError::invalid("image_data", "must not be empty"));
    }

    // Base64 inflates by 4/3; reject obviously oversized payloads before decoding.
    let estimated = payload.len() / 4 * 3;
    if estimated > limits.max_upload_bytes {
        return Err(ValidationError::TooLarge {
            field: "image_data",
            limit: limits.max_upload_bytes,
            actual: estimated,
        });
    }

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| ValidationError::invalid("image_data", format!("is not valid base64: {err}")))
}

fn dimension(field: &'static str, value: Option<i64>, limits: &Limits) -> Result<u32, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if value <= 0 {
        return Err(ValidationError::invalid(field, "must be a positive integer"));
    }
    if value > i64::from(limits.max_image_dimension) {
        return Err(ValidationError::invalid(
            field,
            format!("must not exceed {}", limits.max_image_dimension),
        ));
    }
    u32::try_from(value).map_err(|_| ValidationError::invalid(field, "is out of range"))
}

fn image_format(field: &'static str, value: &str) -> Result<ImageFormat, ValidationError> {
    value
        .parse::<ImageFormat>()
        .map_err(|_| ValidationError::unsupported(field, value, supported_formats()))
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid(field, "must be an integer"))
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ValidationError::invalid(field, "must be a boolean")),
    }
}

// -- Uploads -------------------------------------------------------------

/// Check an uploaded file exists and fits the upload limit.
pub fn require_file(
    file: Option<UploadedFile>,
    limits: &Limits,
) -> Result<UploadedFile, ValidationError> {
    let file = file.ok_or(ValidationError::Missing { field: "file" })?;
    if file.bytes.is_empty() {
        return Err(ValidationError::invalid("file", "must not be empty"));
    }
    if file.bytes.len() > limits.max_upload_bytes {
        return Err(ValidationError::TooLarge {
            field: "file",
            limit: limits.max_upload_bytes,
            actual: file.bytes.len(),
        });
    }
    Ok(file)
}

/// PDF uploads must say they are PDFs, either by content type or, when the
/// client sent a generic type, by file extension.
pub fn ensure_pdf(file: &UploadedFile) -> Result<(), ValidationError> {
    let by_extension = file
        .filename
        .as_deref()
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));

    let accepted = match file.essence().as_deref() {
        Some("application/pdf") => true,
        Some("application/octet-stream") | None => by_extension,
        Some(_) => false,
    };
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::invalid("file", "must be a PDF document"))
    }
}

pub fn ensure_image(file: &UploadedFile) -> Result<(), ValidationError> {
    match file.essence().as_deref() {
        None | Some("application/octet-stream") => Ok(()),
        Some(essence) if essence.starts_with("image/") => Ok(()),
        Some(_) => Err(ValidationError::invalid("file", "must be an image")),
    }
}

/// Multipart fields of `POST /pdf/unlock`.
#[derive(Debug)]
pub struct UnlockCommand {
    pub file: UploadedFile,
    pub password: String,
}

pub fn unlock_command(
    file: Option<UploadedFile>,
    fields: &HashMap<String, String>,
    limits: &Limits,
) -> Result<UnlockCommand, ValidationError> {
    let file = require_file(file, limits)?;
    ensure_pdf(&file)?;
    let password = fields
        .get("password")
        .cloned()
        .ok_or(ValidationError::Missing { field: "password" })?;
    Ok(UnlockCommand { file, password })
}

/// Multipart fields of `POST /pdf/info`.
#[derive(Debug)]
pub struct PdfInfoCommand {
    pub file: UploadedFile,
    pub include_metadata: bool,
}

pub fn pdf_info_command(
    file: Option<UploadedFile>,
    fields: &HashMap<String, String>,
    limits: &Limits,
) -> Result<PdfInfoCommand, ValidationError> {
    let file = require_file(file, limits)?;
    ensure_pdf(&file)?;
    let include_metadata = fields
        .get("include_metadata")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| parse_bool("include_metadata", v))
        .transpose()?
        .unwrap_or(false);
    Ok(PdfInfoCommand {
        file,
        include_metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits {
            max_text_bytes: 16,
            max_upload_bytes: 64,
            max_image_dimension: 500,
        }
    }

    fn upload(content_type: Option<&str>, filename: Option<&str>) -> UploadedFile {
        UploadedFile {
            bytes: b"%PDF-1.4".to_vec(),
            content_type: content_type.map(str::to_string),
            filename: filename.map(str::to_string),
        }
    }

    #[test]
    fn hash_defaults_to_md5() {
        let cmd = HashRequest {
            text: Some("hello".into()),
            algorithm: None,
        }
        .validate(&limits())
        .unwrap();
        assert_eq!(cmd.algorithm, HashAlgorithm::Md5);
    }

    #[test]
    fn hash_rejects_unknown_algorithm() {
        let err = HashRequest {
            text: Some("hello".into()),
            algorithm: Some("whirlpool".into()),
        }
        .validate(&limits())
        .unwrap_err();
        match err {
            ValidationError::Unsupported {
                field, supported, ..
            } => {
                assert_eq!(field, "algorithm");
                assert!(supported.contains(&"sha256".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn text_checks() {
        let missing = EncodeRequest::default().validate(&limits()).unwrap_err();
        assert_eq!(missing, ValidationError::Missing { field: "text" });

        let blank = EncodeRequest {
            text: Some("   ".into()),
            encoding: None,
        }
        .validate(&limits())
        .unwrap_err();
        assert_eq!(blank.field(), Some("text"));

        let long = EncodeRequest {
            text: Some("x".repeat(17)),
            encoding: None,
        }
        .validate(&limits())
        .unwrap_err();
        assert!(matches!(long, ValidationError::TooLarge { actual: 17, .. }));
    }

    #[test]
    fn encoding_is_case_insensitive() {
        let cmd = EncodeRequest {
            text: Some("hi".into()),
            encoding: Some("BASE32".into()),
        }
        .validate(&limits())
        .unwrap();
        assert_eq!(cmd.encoding, Encoding::Base32);
    }

    #[test]
    fn image_data_accepts_data_urls() {
        let request = ImageRequest {
            image_data: Some("data:image/png;base64,aGVsbG8=".into()),
            params: ImageParams::default(),
        };
        assert_eq!(request.into_info(&limits()).unwrap().image, b"hello");
    }

    #[test]
    fn image_data_must_be_base64() {
        let err = ImageRequest {
            image_data: Some("not base64!!".into()),
            params: ImageParams::default(),
        }
        .into_info(&limits())
        .unwrap_err();
        assert_eq!(err.field(), Some("image_data"));
    }

    #[test]
    fn resize_dimensions_are_bounded() {
        let params = |w, h| ImageParams {
            width: Some(w),
            height: Some(h),
            ..ImageParams::default()
        };
        assert!(params(0, 10).resize(vec![1], &limits()).is_err());
        assert!(params(10, -3).resize(vec![1], &limits()).is_err());
        assert!(params(501, 10).resize(vec![1], &limits()).is_err());

        let cmd = params(100, 50).resize(vec![1], &limits()).unwrap();
        assert!(cmd.options.maintain_aspect_ratio);
        assert_eq!(cmd.options.format, None);
    }

    #[test]
    fn convert_requires_known_target() {
        let missing = ImageParams::default().convert(vec![1]).unwrap_err();
        assert_eq!(missing.field(), Some("target_format"));

        let tiff = ImageParams {
            target_format: Some("tiff".into()),
            ..ImageParams::default()
        }
        .convert(vec![1])
        .unwrap_err();
        assert!(matches!(tiff, ValidationError::Unsupported { .. }));

        let jpg = ImageParams {
            target_format: Some("jpg".into()),
            ..ImageParams::default()
        }
        .convert(vec![1])
        .unwrap();
        assert_eq!(jpg.target, ImageFormat::Jpeg);
    }

    #[test]
    fn form_fields_parse() {
        let fields: HashMap<String, String> = [
            ("width", "120"),
            ("height", " 80 "),
            ("maintain_aspect_ratio", "false"),
            ("format", "webp"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let params = ImageParams::from_fields(&fields).unwrap();
        assert_eq!((params.width, params.height), (Some(120), Some(80)));
        assert_eq!(params.maintain_aspect_ratio, Some(false));

        let bad: HashMap<String, String> =
            [("width".to_string(), "wide".to_string())].into_iter().collect();
        assert!(ImageParams::from_fields(&bad).is_err());
    }

    #[test]
    fn pdf_content_type_rules() {
        assert!(ensure_pdf(&upload(Some("application/pdf"), None)).is_ok());
        assert!(ensure_pdf(&upload(Some("application/octet-stream"), Some("a.PDF"))).is_ok());
        assert!(ensure_pdf(&upload(None, Some("scan.pdf"))).is_ok());
        assert!(ensure_pdf(&upload(None, Some("scan.txt"))).is_err());
        assert!(ensure_pdf(&upload(Some("text/plain"), Some("a.pdf"))).is_err());
    }

    #[test]
    fn image_content_type_rules() {
        assert!(ensure_image(&upload(Some("image/png"), None)).is_ok());
        assert!(ensure_image(&upload(None, None)).is_ok());
        assert!(ensure_image(&upload(Some("text/html"), None)).is_err());
    }

    #[test]
    fn unlock_requires_password_field() {
        let file = upload(Some("application/pdf"), Some("a.pdf"));
        let err = unlock_command(Some(file), &HashMap::new(), &limits()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "password" });
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let file = UploadedFile {
            bytes: vec![0; 65],
            content_type: None,
            filename: None,
        };
        let err = require_file(Some(file), &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { limit: 64, .. }));
    }
}
