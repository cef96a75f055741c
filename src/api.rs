//! Typed client for the banking backend. Every response carries a
//! `status` discriminator and, on error, a human-readable `message` that
//! is surfaced to the user verbatim. Transport and decode failures map to
//! [`ApiError::Network`]; no call is ever retried automatically.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Message, Profile, Transaction};

pub const API_BASE_URL: &str = "http://localhost:18080";

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("网络连接错误")]
    Network,
    #[error("{0}")]
    Server(String),
}

/// Envelope mapping shared by every endpoint: `success` yields the
/// payload, anything else yields the server's message.
fn into_result<T>(status: &str, message: Option<String>, payload: Option<T>) -> Result<T, ApiError> {
    if status == STATUS_SUCCESS {
        payload.ok_or(ApiError::Network)
    } else {
        Err(ApiError::Server(
            message.unwrap_or_else(|| "未知错误".to_string()),
        ))
    }
}

/// Like [`into_result`] for endpoints whose success response has no body
/// beyond the envelope.
fn into_ack(status: &str, message: Option<String>) -> Result<(), ApiError> {
    into_result(status, message, Some(()))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let resp = Request::get(&url).send().await.map_err(|_| ApiError::Network)?;
    resp.json::<T>().await.map_err(|_| ApiError::Network)
}

async fn post_json<T: DeserializeOwned>(
    path: &str,
    body: &serde_json::Value,
) -> Result<T, ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let request = Request::post(&url)
        .json(body)
        .map_err(|_| ApiError::Network)?;
    let resp = request.send().await.map_err(|_| ApiError::Network)?;
    resp.json::<T>().await.map_err(|_| ApiError::Network)
}

#[derive(Deserialize)]
struct Ack {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct BalanceResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    balance: Option<f64>,
}

// The userinfo endpoint returns the profile fields flattened next to the
// envelope, so the payload is collected as a raw value and parsed only on
// success.
#[derive(Deserialize)]
struct UserInfoResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Value,
}

fn profile_from(resp: UserInfoResponse) -> Result<Profile, ApiError> {
    let profile = serde_json::from_value::<Profile>(resp.rest).ok();
    into_result(&resp.status, resp.message, profile)
}

#[derive(Deserialize)]
struct TransactionsResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

#[derive(Deserialize)]
struct NameResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct CheckCardResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    available: Option<bool>,
}

#[derive(Deserialize)]
struct RegisterResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    card_number: Option<String>,
}

/// Login is the only way a card number enters the session.
pub async fn login(card_number: &str, password: &str) -> Result<f64, ApiError> {
    let body = serde_json::json!({ "card_number": card_number, "password": password });
    let resp: BalanceResponse = post_json("/api/login", &body).await?;
    into_result(&resp.status, resp.message, resp.balance)
}

pub async fn fetch_profile(card_number: &str) -> Result<Profile, ApiError> {
    let resp: UserInfoResponse = get_json(&format!("/api/userinfo/{}", card_number)).await?;
    profile_from(resp)
}

pub async fn fetch_balance(card_number: &str) -> Result<f64, ApiError> {
    let resp: BalanceResponse = get_json(&format!("/api/balance/{}", card_number)).await?;
    into_result(&resp.status, resp.message, resp.balance)
}

pub async fn fetch_transactions(card_number: &str) -> Result<Vec<Transaction>, ApiError> {
    let resp: TransactionsResponse =
        get_json(&format!("/api/transactions/{}", card_number)).await?;
    into_result(&resp.status, resp.message, resp.transactions)
}

pub async fn fetch_messages(card_number: &str) -> Result<Vec<Message>, ApiError> {
    let resp: MessagesResponse = get_json(&format!("/api/messages/{}", card_number)).await?;
    into_result(&resp.status, resp.message, resp.messages)
}

/// Persists the optimistic read flag; callers treat this as
/// fire-and-forget and only log a failure.
pub async fn mark_message_read(id: i64) -> Result<(), ApiError> {
    let body = serde_json::json!({ "id": id });
    let resp: Ack = post_json("/api/messages/read", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn deposit(card_number: &str, amount: f64) -> Result<(), ApiError> {
    let body = serde_json::json!({ "card_number": card_number, "amount": amount });
    let resp: Ack = post_json("/api/deposit", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn withdraw(card_number: &str, amount: f64) -> Result<(), ApiError> {
    let body = serde_json::json!({ "card_number": card_number, "amount": amount });
    let resp: Ack = post_json("/api/withdraw", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn transfer(
    from_card: &str,
    to_card: &str,
    amount: f64,
    message: &str,
    is_anonymous: bool,
) -> Result<(), ApiError> {
    let body = serde_json::json!({
        "from_card": from_card,
        "to_card": to_card,
        "amount": amount,
        "message": message,
        "is_anonymous": is_anonymous,
    });
    let resp: Ack = post_json("/api/transfer", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn fetch_user_name(card_number: &str) -> Result<String, ApiError> {
    let resp: NameResponse = get_json(&format!("/api/user/name/{}", card_number)).await?;
    into_result(&resp.status, resp.message, resp.name)
}

pub async fn update_profile(
    card_number: &str,
    name: &str,
    id_card: &str,
    phone: &str,
    address: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({
        "card_number": card_number,
        "name": name,
        "id_card": id_card,
        "phone": phone,
        "address": address,
    });
    let resp: Ack = post_json("/api/user/update", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn change_password(
    card_number: &str,
    old_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let body = serde_json::json!({
        "card_number": card_number,
        "old_password": old_password,
        "new_password": new_password,
    });
    let resp: Ack = post_json("/api/password/change", &body).await?;
    into_ack(&resp.status, resp.message)
}

pub async fn check_card(card_number: &str) -> Result<bool, ApiError> {
    let resp: CheckCardResponse = get_json(&format!("/api/check-card/{}", card_number)).await?;
    into_result(&resp.status, resp.message, resp.available)
}

pub async fn register(
    form: &crate::validate::RegistrationForm,
    initial_deposit: f64,
) -> Result<String, ApiError> {
    let body = serde_json::json!({
        "name": form.name.trim(),
        "id_card": form.id_card.trim(),
        "phone": form.phone.trim(),
        "address": form.address.trim(),
        "card_number": form.card_number.trim(),
        "password": form.password,
        "initial_deposit": initial_deposit,
    });
    let resp: RegisterResponse = post_json("/api/register", &body).await?;
    into_result(&resp.status, resp.message, resp.card_number)
}

/// Identity verification before deletion; returns the remaining balance.
pub async fn account_check(card_number: &str, name: &str, phone: &str) -> Result<f64, ApiError> {
    let body = serde_json::json!({ "card_number": card_number, "name": name, "phone": phone });
    let resp: BalanceResponse = post_json("/api/account/check", &body).await?;
    into_result(&resp.status, resp.message, resp.balance)
}

pub async fn account_delete(card_number: &str) -> Result<(), ApiError> {
    let body = serde_json::json!({ "card_number": card_number });
    let resp: Ack = post_json("/api/account/delete", &body).await?;
    into_ack(&resp.status, resp.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_payload_is_ok() {
        assert_eq!(into_result("success", None, Some(5)), Ok(5));
    }

    #[test]
    fn success_without_payload_is_a_decode_failure() {
        assert_eq!(into_result::<i32>("success", None, None), Err(ApiError::Network));
    }

    #[test]
    fn server_message_is_surfaced_verbatim() {
        assert_eq!(
            into_result::<i32>("error", Some("余额不足".to_string()), None),
            Err(ApiError::Server("余额不足".to_string()))
        );
        assert_eq!(
            into_result::<i32>("error", None, Some(1)),
            Err(ApiError::Server("未知错误".to_string()))
        );
        assert_eq!(
            ApiError::Server("余额不足".to_string()).to_string(),
            "余额不足"
        );
        assert_eq!(ApiError::Network.to_string(), "网络连接错误");
    }

    #[test]
    fn envelope_structs_tolerate_error_bodies() {
        let raw = r#"{"status":"error","message":"卡号不存在"}"#;
        let resp: BalanceResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            into_result(&resp.status, resp.message, resp.balance),
            Err(ApiError::Server("卡号不存在".to_string()))
        );

        let resp: TransactionsResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.transactions.is_none());
    }

    #[test]
    fn transaction_list_decodes_from_backend_shape() {
        let raw = r#"{
            "status": "success",
            "transactions": [
                {"type": "deposit", "amount": 100.0, "balance_after": 100.0,
                 "create_time": "2024-01-01 10:00:00", "description": "工资"},
                {"type": "tr_out", "amount": 30.0, "balance_after": 70.0,
                 "create_time": "2024-01-02 10:00:00", "description": null}
            ]
        }"#;
        let resp: TransactionsResponse = serde_json::from_str(raw).unwrap();
        let list = into_result(&resp.status, resp.message, resp.transactions).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, "deposit");
        assert_eq!(list[1].description, None);
    }

    #[test]
    fn userinfo_decodes_flattened_profile_fields() {
        let raw = r#"{
            "status": "success",
            "name": "张三",
            "id_card": "11010119900101123X",
            "phone": "13800138000",
            "address": null,
            "card_number": "6222020000000001",
            "balance": 150.5,
            "create_time": "2023-05-01 09:00:00"
        }"#;
        let resp: UserInfoResponse = serde_json::from_str(raw).unwrap();
        let profile = profile_from(resp).unwrap();
        assert_eq!(profile.name, "张三");
        assert_eq!(profile.balance, 150.5);
        assert_eq!(profile.address, None);
    }

    #[test]
    fn userinfo_error_body_surfaces_the_server_message() {
        let raw = r#"{"status":"error","message":"卡号不存在"}"#;
        let resp: UserInfoResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            profile_from(resp),
            Err(ApiError::Server("卡号不存在".to_string()))
        );
    }

    #[test]
    fn message_list_decodes_optional_fields() {
        let raw = r#"{
            "status": "success",
            "messages": [
                {"id": 7, "type": "transfer", "content": "收到转账",
                 "is_read": 0, "create_time": "2024-02-01 12:00:00",
                 "sender_name": "李四", "amount": 50.0},
                {"id": 8, "type": "system", "content": "欢迎开户",
                 "is_read": 1, "create_time": "2024-01-01 12:00:00"}
            ]
        }"#;
        let resp: MessagesResponse = serde_json::from_str(raw).unwrap();
        let list = into_result(&resp.status, resp.message, resp.messages).unwrap();
        assert!(list[0].is_transfer_alert());
        assert_eq!(list[1].sender_name, None);
        assert_eq!(list[1].amount, None);
    }
}
