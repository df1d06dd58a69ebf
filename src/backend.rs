//! Backend HTTP interface
//!
//! The points/tickets service is an external collaborator reached with
//! same-origin JSON requests:
//!
//! - `GET  /getUserData?username=…` → points + tickets (gates play)
//! - `POST /updateTickets`          → persists a consumed ticket
//! - `POST /saveUser`               → reports the final score at game over
//! - `GET  /topUsers`               → ordered leaderboard entries
//!
//! DTO parsing is pure and tested natively; the fetch transport is wasm
//! only. Callers log and swallow transport errors, the session never dies
//! on a failed report.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// `GET /getUserData` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub success: bool,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub tickets: u32,
    #[serde(default)]
    pub referral_link: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UserDataResponse {
    /// Build the client-side profile from a successful response
    pub fn into_profile(self, username: &str) -> Option<Profile> {
        self.success
            .then(|| Profile::new(username, self.points, self.tickets))
    }
}

/// `POST /updateTickets` and `POST /saveUser` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub tickets: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One `GET /topUsers` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUser {
    pub username: String,
    pub points: i64,
}

/// `POST /updateTickets` body
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTicketsRequest<'a> {
    pub username: &'a str,
    pub tickets: u32,
}

/// `POST /saveUser` body
#[derive(Debug, Clone, Serialize)]
pub struct SaveUserRequest<'a> {
    pub username: &'a str,
    pub points: u32,
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::{
        SaveUserRequest, TopUser, UpdateResponse, UpdateTicketsRequest, UserDataResponse,
    };

    /// Fetch the player's balance at session init
    pub async fn fetch_user_data(username: &str) -> Result<UserDataResponse, JsValue> {
        let encoded = js_sys::encode_uri_component(username);
        let url = format!("/getUserData?username={}", String::from(encoded));
        parse(&get_text(&url).await?)
    }

    /// Persist the ticket balance after a play consumed one
    pub async fn update_tickets(username: &str, tickets: u32) -> Result<UpdateResponse, JsValue> {
        let body = serde_json::to_string(&UpdateTicketsRequest { username, tickets })
            .map_err(to_js_err)?;
        parse(&post_text("/updateTickets", &body).await?)
    }

    /// Report the final score at game over
    pub async fn save_score(username: &str, points: u32) -> Result<UpdateResponse, JsValue> {
        let body =
            serde_json::to_string(&SaveUserRequest { username, points }).map_err(to_js_err)?;
        parse(&post_text("/saveUser", &body).await?)
    }

    /// Fetch the leaderboard
    pub async fn fetch_top_users() -> Result<Vec<TopUser>, JsValue> {
        parse(&get_text("/topUsers").await?)
    }

    async fn get_text(url: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
        read_body(resp_value).await
    }

    async fn post_text(url: &str, body: &str) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(body));
        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        read_body(resp_value).await
    }

    async fn read_body(resp_value: JsValue) -> Result<String, JsValue> {
        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
        }
        let text = JsFuture::from(resp.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("non-text response body"))
    }

    fn parse<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, JsValue> {
        serde_json::from_str(text).map_err(to_js_err)
    }

    fn to_js_err(err: serde_json::Error) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub use transport::{fetch_top_users, fetch_user_data, save_score, update_tickets};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_success_shape() {
        // Shape matches the server's getUserData handler
        let json = r#"{"success": true, "points": 120, "tickets": 3}"#;
        let resp: UserDataResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        let profile = resp.into_profile("alice").unwrap();
        assert_eq!(profile.points, 120);
        assert_eq!(profile.tickets, 3);
    }

    #[test]
    fn test_user_data_error_shape() {
        let json = r#"{"success": false, "error": "Username is required"}"#;
        let resp: UserDataResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Username is required"));
        assert!(resp.into_profile("alice").is_none());
    }

    #[test]
    fn test_save_user_response_shape() {
        let json = r#"{"success": true, "points": 145, "tickets": 99}"#;
        let resp: UpdateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.points, Some(145));
    }

    #[test]
    fn test_top_users_shape() {
        let json = r#"[{"username": "a", "points": 9}, {"username": "b", "points": 5}]"#;
        let users: Vec<TopUser> = serde_json::from_str(json).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "a");
    }

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_string(&UpdateTicketsRequest {
            username: "alice",
            tickets: 2,
        })
        .unwrap();
        assert_eq!(body, r#"{"username":"alice","tickets":2}"#);

        let body = serde_json::to_string(&SaveUserRequest {
            username: "alice",
            points: 17,
        })
        .unwrap();
        assert_eq!(body, r#"{"username":"alice","points":17}"#);
    }
}
