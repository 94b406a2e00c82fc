//! End-to-end tests of the upload endpoint through the axum router.

use std::io::Cursor;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use image::{ImageFormat, RgbImage};
use kbfit_core::encode::encode_jpeg;
use kbfit_core::target::bytes_to_kb;
use kbfit_server::config::DEFAULT_MAX_UPLOAD_BYTES;
use kbfit_server::{router, AppState};
use tower::ServiceExt;

const BOUNDARY: &str = "kbfit-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn app() -> Router {
    router(AppState::default(), DEFAULT_MAX_UPLOAD_BYTES)
}

async fn post_form(app: Router, parts: &[Part<'_>]) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

fn header_str<'a>(response: &'a Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) * 127 / (width + height)) as u8,
        ])
    })
}

fn noise(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x9E37_79B9;
    RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        image::Rgb([next(), next(), next()])
    })
}

fn png(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_small_result_is_padded_to_target() {
    let source = png(&gradient(192, 108));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "150"),
            Part::Text("height", "200"),
            Part::Text("target_kb", "50"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "content-type"), "image/jpeg");
    assert_eq!(
        header_str(&response, "content-disposition"),
        "attachment; filename=\"padded.jpg\""
    );
    assert_eq!(header_str(&response, "x-fit-outcome"), "padded");
    assert_eq!(header_str(&response, "x-original-width"), "192");
    assert_eq!(header_str(&response, "x-original-height"), "108");
    assert!(response.headers().get("x-jpeg-quality").is_none());

    let body = body_bytes(response).await;
    assert_eq!(body.len(), 50 * 1024);
    assert_eq!(&body[0..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_large_result_is_compressed() {
    let src = noise(160, 160);
    let target_kb = bytes_to_kb(encode_jpeg(src.as_raw(), 160, 160, 50).unwrap().len()).ceil();
    let target = format!("{}", target_kb as u32);
    let source = png(&src);

    let response = post_form(
        app(),
        &[
            Part::File("image", "noise.png", &source),
            Part::Text("width", "160"),
            Part::Text("height", "160"),
            Part::Text("target_kb", &target),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, "content-disposition"),
        "attachment; filename=\"compressed.jpg\""
    );
    let quality: u8 = header_str(&response, "x-jpeg-quality").parse().unwrap();
    assert!((50..95).contains(&quality));

    let body = body_bytes(response).await;
    assert!(bytes_to_kb(body.len()) <= target_kb);
    assert_eq!(&body[body.len() - 2..], &[0xFF, 0xD9]);
}

#[tokio::test]
async fn test_close_result_is_returned_as_final() {
    let src = noise(64, 64);
    let baseline = encode_jpeg(src.as_raw(), 64, 64, 95).unwrap();
    let target = format!("{}", bytes_to_kb(baseline.len()).ceil() as u32);
    let source = png(&src);

    let response = post_form(
        app(),
        &[
            Part::Text("width", "64"),
            Part::Text("height", "64"),
            Part::Text("target_kb", &target),
            Part::File("image", "noise.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, "content-disposition"),
        "attachment; filename=\"final.jpg\""
    );
    assert_eq!(body_bytes(response).await, baseline);
}

#[tokio::test]
async fn test_unattainable_target_is_422() {
    let source = png(&noise(320, 320));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "320"),
            Part::Text("height", "320"),
            Part::Text("target_kb", "1"),
            Part::File("image", "noise.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response)
        .await
        .starts_with("Couldn't compress to target size"));
}

#[tokio::test]
async fn test_missing_image_is_no_file_provided() {
    let response = post_form(
        app(),
        &[
            Part::Text("width", "150"),
            Part::Text("height", "200"),
            Part::Text("target_kb", "50"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file uploaded");
}

#[tokio::test]
async fn test_empty_file_is_no_file_provided() {
    let response = post_form(
        app(),
        &[
            Part::Text("width", "150"),
            Part::Text("height", "200"),
            Part::Text("target_kb", "50"),
            Part::File("image", "", b""),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file uploaded");
}

#[tokio::test]
async fn test_missing_field_is_400() {
    let source = png(&gradient(16, 16));
    let response = post_form(
        app(),
        &[
            Part::Text("height", "200"),
            Part::Text("target_kb", "50"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Missing required field: width");
}

#[tokio::test]
async fn test_non_integer_field_is_400() {
    let source = png(&gradient(16, 16));
    for bad in ["abc", "-5", "2.5"] {
        let response = post_form(
            app(),
            &[
                Part::Text("width", "150"),
                Part::Text("height", bad),
                Part::Text("target_kb", "50"),
                Part::File("image", "photo.png", &source),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "height={bad}");
    }
}

#[tokio::test]
async fn test_zero_dimension_is_400() {
    let source = png(&gradient(16, 16));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "0"),
            Part::Text("height", "20"),
            Part::Text("target_kb", "50"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_target_is_400() {
    let source = png(&gradient(16, 16));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "10"),
            Part::Text("height", "10"),
            Part::Text("target_kb", "0"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_target_above_ceiling_is_400() {
    let source = png(&gradient(8, 8));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "8"),
            Part::Text("height", "8"),
            Part::Text("target_kb", "4294967295"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .starts_with("Target size too large"));
}

#[tokio::test]
async fn test_huge_dimensions_are_400() {
    let source = png(&gradient(8, 8));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "4294967295"),
            Part::Text("height", "4294967295"),
            Part::Text("target_kb", "50"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("Output too large"));
}

#[tokio::test]
async fn test_side_longer_than_jpeg_allows_is_400() {
    let source = png(&gradient(8, 8));
    let response = post_form(
        app(),
        &[
            Part::Text("width", "70000"),
            Part::Text("height", "1"),
            Part::Text("target_kb", "50"),
            Part::File("image", "photo.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .starts_with("Could not resize image"));
}

#[tokio::test]
async fn test_undecodable_image_is_415() {
    let response = post_form(
        app(),
        &[
            Part::Text("width", "150"),
            Part::Text("height", "200"),
            Part::Text("target_kb", "50"),
            Part::File("image", "notes.txt", b"this is not an image"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body_text(response)
        .await
        .starts_with("Could not decode image"));
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let source = png(&noise(64, 64));
    let response = post_form(
        router(AppState::default(), 1024),
        &[
            Part::Text("width", "10"),
            Part::Text("height", "10"),
            Part::Text("target_kb", "5"),
            Part::File("image", "noise.png", &source),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
