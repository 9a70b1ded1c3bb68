//! REST client for the Prajnayana server.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AuthToken, RegisterRequest};
use crate::error::{CoreError, Result};
use crate::habits::{Habit, HabitId, HabitTrackingEntry, NewHabit, NewTrackingEntry};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::questionnaire::{DiscoveryQuestion, NewResponse, QuestionnaireResponse, TestSession};
use crate::storage::ApiConfig;
use crate::vision_board::{NewNote, Note, NoteId, NotePatch};

/// List endpoints answer with a bare array, or a page object when the
/// server has pagination switched on.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) | Listing::Paged { results: items } => items,
        }
    }
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated HTTP client.
///
/// The token is injected at construction; one client serves every page.
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    authorization: Option<String>,
}

impl ApiClient {
    /// Client that sends `Authorization: <scheme> <token>` on every request.
    pub fn new(config: &ApiConfig, token: &AuthToken) -> Result<Self> {
        let mut client = Self::anonymous(config)?;
        client.authorization = Some(format!("{} {}", config.auth_scheme, token.as_str()));
        Ok(client)
    }

    /// Client without credentials, for registration.
    pub fn anonymous(config: &ApiConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url: Url::parse(&base)?,
            authorization: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        self.get_list("habits/").await
    }

    pub async fn create_habit(&self, name: &str, description: Option<&str>) -> Result<Habit> {
        self.send_json(Method::POST, "habits/", &NewHabit { name, description })
            .await
    }

    pub async fn delete_habit(&self, id: HabitId) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("habits/{id}/"))?)
            .await
    }

    pub async fn list_tracking(&self) -> Result<Vec<HabitTrackingEntry>> {
        self.get_list("habit_tracking/").await
    }

    pub async fn create_tracking(&self, entry: &NewTrackingEntry) -> Result<HabitTrackingEntry> {
        self.send_json(Method::POST, "habit_tracking/", entry).await
    }

    pub async fn update_tracking(&self, entry_id: i64, completed: bool) -> Result<HabitTrackingEntry> {
        self.send_json(
            Method::PATCH,
            &format!("habit_tracking/{entry_id}/"),
            &json!({ "completed": completed }),
        )
        .await
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.get_list("vision-board/").await
    }

    pub async fn create_note(&self, note: &NewNote) -> Result<Note> {
        self.send_json(Method::POST, "vision-board/", note).await
    }

    pub async fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note> {
        self.send_json(Method::PATCH, &format!("vision-board/{id}/"), patch)
            .await
    }

    pub async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("vision-board/{id}/"))?)
            .await
    }

    pub async fn get_user(&self, id: i64) -> Result<UserProfile> {
        let resp = self.send(self.request(Method::GET, &format!("auth/users/{id}/"))?).await?;
        Ok(resp.json().await?)
    }

    /// The server answers with a status message, not the updated record.
    pub async fn update_user(&self, id: i64, update: &ProfileUpdate) -> Result<String> {
        let body: MessageBody = self
            .send_json(Method::PUT, &format!("auth/users/{id}/"), update)
            .await?;
        Ok(body.message.unwrap_or_else(|| "User updated successfully".to_string()))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<String> {
        request.validate()?;
        let body: MessageBody = self
            .send_json(Method::POST, "auth/register/", request)
            .await?;
        Ok(body.message.unwrap_or_else(|| "User registered successfully".to_string()))
    }

    pub async fn list_questions(&self) -> Result<Vec<DiscoveryQuestion>> {
        self.get_list("discovery_questions/").await
    }

    pub async fn list_sessions(&self) -> Result<Vec<TestSession>> {
        self.get_list("test_sessions/").await
    }

    pub async fn create_session(&self) -> Result<TestSession> {
        self.send_json(Method::POST, "test_sessions/", &json!({})).await
    }

    pub async fn list_responses(&self) -> Result<Vec<QuestionnaireResponse>> {
        self.get_list("user_responses/").await
    }

    pub async fn submit_response(&self, response: &NewResponse) -> Result<QuestionnaireResponse> {
        self.send_json(Method::POST, "user_responses/", response).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "api request");
        let builder = self.http_client.request(method, url);
        Ok(match &self.authorization {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let resp = self.send(self.request(Method::GET, path)?).await?;
        let listing: Listing<T> = resp.json().await?;
        Ok(listing.into_vec())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(method, path)?.json(body)).await?;
        Ok(resp.json().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let url = resp.url().clone();
        let message = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %url, "api request failed");
        if status == StatusCode::UNAUTHORIZED {
            return Err(CoreError::Unauthorized);
        }
        Err(CoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
