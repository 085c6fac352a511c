use {
    std::sync::Arc,
    serde::Serialize,
    tracing::error,
    axum::{
        Router,
        Extension,
        Json,
        body::Body,
        extract::Multipart,
        http::{
            header::{CONTENT_DISPOSITION, CONTENT_TYPE},
            HeaderValue,
            StatusCode,
        },
        response::{Html, IntoResponse, Response},
        routing::{get, post},
    },
    crate::{
        entities::{ProcessingMode, ProcessingResult, UploadedDocument, DOWNLOAD_FILE_NAME},
        processing::{ProcessingError, TextProcessor},
    },
};

const GENERIC_FAILURE: &str = "an error occurred during processing, please try again";

const INDEX_PAGE: &str = r#"<!doctype html>
<html>
<head><title>textlab</title></head>
<body>
  <h1>File Upload and Processing</h1>
  <form action="/v1/process/download" method="post" enctype="multipart/form-data">
    <p>
      <label>Select the process</label>
      <select name="process_type">
        <option>NLP Process</option>
        <option>NLP Summarization</option>
        <option>Topic Modelling</option>
      </select>
    </p>
    <p>
      <label>Upload a file</label>
      <input type="file" name="file" accept=".txt">
    </p>
    <p><button type="submit">Process and download</button></p>
  </form>
</body>
</html>
"#;

#[derive(Serialize)]
pub struct ProcessResponse {
    pub file_name: String,
    pub process_type: String,
    pub original_text: String,
    pub processed_data: String,
}

pub fn rest_router(processor: Arc<TextProcessor>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/v1/process", post(process_file))
        .route("/v1/process/download", post(download_processed))
        .layer(Extension(processor))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn process_file(Extension(processor): Extension<Arc<TextProcessor>>, multipart: Multipart) -> Response {
    let (document, mode, result) = match run_processing(processor.clone(), multipart).await {
        Ok(v) => v,
        Err(response) => return response,
    };

    let original_text = processor.preview(&document).unwrap_or_default();

    Json(ProcessResponse {
        file_name: document.name().to_owned(),
        process_type: mode.to_string(),
        original_text,
        processed_data: result.as_text().to_owned(),
    })
    .into_response()
}

async fn download_processed(Extension(processor): Extension<Arc<TextProcessor>>, multipart: Multipart) -> Response {
    let (_document, _mode, result) = match run_processing(processor, multipart).await {
        Ok(v) => v,
        Err(response) => return response,
    };

    let mut response = Response::new(Body::from(result.into_bytes()));
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response.headers_mut().insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME)).unwrap(),
    );
    response.into_response()
}

async fn run_processing(
    processor: Arc<TextProcessor>,
    multipart: Multipart,
) -> Result<(UploadedDocument, ProcessingMode, ProcessingResult), Response> {
    let (document, mode) = read_upload(multipart).await?;

    // model invocations block, keep them off the runtime threads
    let (document, result) = match tokio::task::spawn_blocking(move || {
        let result = processor.process(&document, mode);
        (document, result)
    })
    .await
    {
        Ok(v) => v,
        Err(err) => {
            error!("processing task failed: {:?}", err);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response());
        }
    };

    match result {
        Ok(result) => Ok((document, mode, result)),
        Err(err) => Err(failure_response(document.name(), mode, err)),
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<(UploadedDocument, ProcessingMode), Response> {
    let mut file: Option<UploadedDocument> = None;
    let mut mode: Option<ProcessingMode> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or("").to_owned();

        match field_name.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or("upload.txt").to_owned();
                let content = match field.bytes().await {
                    Ok(v) => v,
                    Err(err) => {
                        error!("failed to read uploaded file: {:?}", err);
                        return Err((StatusCode::BAD_REQUEST, GENERIC_FAILURE).into_response());
                    }
                };
                file = Some(UploadedDocument::new(name, content.to_vec()));
            }
            "process_type" => {
                let label = match field.text().await {
                    Ok(v) => v,
                    Err(err) => {
                        error!("failed to read process type field: {:?}", err);
                        return Err((StatusCode::BAD_REQUEST, GENERIC_FAILURE).into_response());
                    }
                };
                mode = match label.parse() {
                    Ok(v) => Some(v),
                    Err(err) => {
                        error!("rejecting upload: {:?}", err);
                        return Err((StatusCode::BAD_REQUEST, "unknown process type").into_response());
                    }
                };
            }
            _ => {}
        }
    }

    match (file, mode) {
        (Some(file), Some(mode)) => Ok((file, mode)),
        _ => Err((StatusCode::BAD_REQUEST, "expected a file upload and a process type").into_response()),
    }
}

fn failure_response(file_name: &str, mode: ProcessingMode, err: ProcessingError) -> Response {
    error!("failed to process file: {}, mode: {}, error: {:?}", file_name, mode, err);

    let status = match err {
        ProcessingError::Decode(_) => StatusCode::BAD_REQUEST,
        ProcessingError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, GENERIC_FAILURE).into_response()
}
