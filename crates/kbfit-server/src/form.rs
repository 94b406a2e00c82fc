//! Multipart upload form.

use axum::body::Bytes;
use axum::extract::Multipart;
use kbfit_core::EncodingRequest;

use crate::error::FormError;

/// Parsed upload form: `width`, `height`, `target_kb` and the `image` file.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub width: u32,
    pub height: u32,
    pub target_kb: u32,
    /// Empty when no file was attached.
    pub image: Bytes,
}

impl UploadForm {
    /// Read every field of the form. Unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut width = None;
        let mut height = None;
        let mut target_kb = None;
        let mut image = Bytes::new();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("width") => width = Some(parse_integer("width", &field.text().await?)?),
                Some("height") => height = Some(parse_integer("height", &field.text().await?)?),
                Some("target_kb") => {
                    target_kb = Some(parse_integer("target_kb", &field.text().await?)?)
                }
                Some("image") => image = field.bytes().await?,
                _ => {}
            }
        }

        Ok(Self {
            width: width.ok_or(FormError::MissingField("width"))?,
            height: height.ok_or(FormError::MissingField("height"))?,
            target_kb: target_kb.ok_or(FormError::MissingField("target_kb"))?,
            image,
        })
    }

    /// Borrow the form as a core encoding request.
    pub fn request(&self) -> EncodingRequest<'_> {
        EncodingRequest::new(
            &self.image,
            self.width,
            self.height,
            f64::from(self.target_kb),
        )
    }
}

fn parse_integer(name: &'static str, raw: &str) -> Result<u32, FormError> {
    raw.trim().parse().map_err(|_| FormError::InvalidField {
        name,
        value: raw.to_string(),
    })
}
