//! Typed HTTP client for the notes server API.

use crate::domain::{Attachment, Group, Note, NoteDraft, NoteQuery};
use crate::error::ApiError;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const CSRF_HEADER: &str = "X-CSRFToken";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Raw attachment content as served by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentBlob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct GroupBody<'a> {
    name: &'a str,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    csrf_token: Option<String>,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

// ── Construction ────────────────────────────────────

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token: None,
            session_cookie: None,
            client,
        }
    }

    /// Token attached to every mutating request
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// ── Notes ───────────────────────────────────────────

impl ApiClient {
    /// `GET /api/notes` with the server-side filters
    pub async fn list_notes(&self, query: &NoteQuery) -> ApiResult<Vec<Note>> {
        let url = self.url("/api/notes");
        let resp = self
            .request(Method::GET, &url)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_json(&url, ensure_success(&url, resp).await?).await
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        let url = self.url("/api/notes");
        let resp = self.send_json(Method::POST, &url, draft).await?;
        decode_json(&url, resp).await
    }

    pub async fn update_note(&self, id: i64, draft: &NoteDraft) -> ApiResult<()> {
        let url = self.url(&format!("/api/notes/{}", id));
        self.send_json(Method::PATCH, &url, draft).await?;
        Ok(())
    }

    pub async fn delete_note(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/notes/{}", id));
        self.send_empty(Method::DELETE, &url).await?;
        Ok(())
    }
}

// ── Groups ──────────────────────────────────────────

impl ApiClient {
    pub async fn list_groups(&self) -> ApiResult<Vec<Group>> {
        let url = self.url("/api/groups");
        let resp = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_json(&url, ensure_success(&url, resp).await?).await
    }

    pub async fn create_group(&self, name: &str) -> ApiResult<Group> {
        let url = self.url("/api/groups");
        let resp = self
            .send_json(Method::POST, &url, &GroupBody { name })
            .await?;
        let mut group: Group = decode_json(&url, resp).await?;
        if group.name.is_empty() {
            group.name = name.to_string();
        }
        Ok(group)
    }

    /// The server may answer with just `{"ok": true}`; the group is then
    /// rebuilt from the request.
    pub async fn rename_group(&self, id: i64, name: &str) -> ApiResult<Group> {
        let url = self.url(&format!("/api/groups/{}", id));
        let resp = self
            .send_json(Method::PATCH, &url, &GroupBody { name })
            .await?;
        let body = resp.text().await.map_err(|e| transport(&url, e))?;
        Ok(serde_json::from_str::<Group>(&body).unwrap_or(Group {
            id,
            name: name.to_string(),
        }))
    }

    /// Notes in the group keep existing; only the association goes away.
    pub async fn delete_group(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/groups/{}", id));
        self.send_empty(Method::DELETE, &url).await?;
        Ok(())
    }
}

// ── Attachments ─────────────────────────────────────

impl ApiClient {
    /// Multipart upload under the `file` field
    pub async fn upload_attachment(
        &self,
        note_id: i64,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<Attachment> {
        let url = self.url(&format!("/api/notes/{}/attachments", note_id));
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::Decode {
                url: url.clone(),
                detail: format!("invalid mime type '{}': {}", mime_type, e),
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .mutating(Method::POST, &url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        let mut attachment: Attachment = decode_json(&url, ensure_success(&url, resp).await?).await?;
        if attachment.filename.is_empty() {
            attachment.filename = filename.to_string();
        }
        Ok(attachment)
    }

    pub async fn fetch_attachment(&self, id: i64) -> ApiResult<AttachmentBlob> {
        let url = self.url(&format!("/api/attachments/{}", id));
        let resp = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        let resp = ensure_success(&url, resp).await?;

        let mime_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await.map_err(|e| transport(&url, e))?;

        Ok(AttachmentBlob {
            mime_type,
            bytes: bytes.to_vec(),
        })
    }

    pub async fn delete_attachment(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/attachments/{}", id));
        self.send_empty(Method::DELETE, &url).await?;
        Ok(())
    }
}

// ── Plumbing ────────────────────────────────────────

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(%method, url, "api request");
        let builder = self.client.request(method, url);
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Request carrying the anti-forgery token
    fn mutating(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.request(method, url);
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> ApiResult<Response> {
        let resp = self
            .mutating(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(url, e))?;
        ensure_success(url, resp).await
    }

    async fn send_empty(&self, method: Method, url: &str) -> ApiResult<Response> {
        let resp = self
            .mutating(method, url)
            .send()
            .await
            .map_err(|e| transport(url, e))?;
        ensure_success(url, resp).await
    }
}

fn transport(url: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Turn a non-success status into an error carrying the response text
async fn ensure_success(url: &str, resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode_json<T: DeserializeOwned>(url: &str, resp: Response) -> ApiResult<T> {
    let body = resp.text().await.map_err(|e| transport(url, e))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        detail: e.to_string(),
    })
}
