use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use portal_core::models::applicant::RegistrationFields;
use portal_service::auth::Role;

use super::require;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub user_id: String,
    pub full_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub token: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub data: RegisterData,
}

pub async fn register(
    State(state): State<AppState>,
    Json(fields): Json<RegistrationFields>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.service.register(fields).await?;
    let applicant = outcome.applicant;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful! Login credentials sent to your email."
                .to_string(),
            data: RegisterData {
                user_id: applicant.applicant_id,
                full_name: applicant.full_name,
                email_address: applicant.email_address,
                mobile_number: applicant.mobile_number,
                token: outcome.token,
            },
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    pub full_name: String,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    pub role: Role,
    pub token: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: LoginData,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    require("userId", &request.user_id, "User ID is required")?;
    require("password", &request.password, "Password is required")?;

    let session = state
        .service
        .login(&request.user_id, &request.password)
        .await?;

    let message = match session.role {
        Role::Admin => "Admin login successful",
        Role::Applicant => "Login successful",
    };

    Ok(Json(LoginResponse {
        success: true,
        message: message.to_string(),
        data: LoginData {
            user_id: session.applicant_id,
            post_code: session.post_code,
            full_name: session.full_name,
            email_address: session.email_address,
            mobile_number: session.mobile_number,
            role: session.role,
            token: session.token,
        },
    }))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

fn message_response(message: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: message.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOtpRequest {
    pub mobile_number: String,
    pub email_address: String,
}

/// Pre-registration OTP: duplicate check plus an emailed code; nothing is
/// persisted on this path.
pub async fn generate_registration_otp(
    State(state): State<AppState>,
    Json(request): Json<RegistrationOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("mobileNumber", &request.mobile_number, "Mobile number is required")?;
    require("emailAddress", &request.email_address, "Email is required")?;

    state
        .service
        .request_registration_otp(&request.mobile_number, &request.email_address)
        .await?;

    Ok(message_response("OTP sent successfully to your email"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOtpRequest {
    pub mobile_number: String,
}

pub async fn generate_user_otp(
    State(state): State<AppState>,
    Json(request): Json<UserOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("mobileNumber", &request.mobile_number, "Mobile number is required")?;

    state.service.request_otp(&request.mobile_number).await?;
    Ok(message_response("OTP sent successfully to your registered email"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub mobile_number: String,
    pub otp: String,
}

/// Registration-flow verify: a format check only (see the OTP gate notes).
pub async fn verify_registration_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("mobileNumber", &request.mobile_number, "Mobile number is required")?;
    require("otp", &request.otp, "OTP is required")?;

    state.service.verify_registration_otp(&request.otp)?;
    Ok(message_response("OTP verified successfully"))
}

pub async fn verify_user_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("mobileNumber", &request.mobile_number, "Mobile number is required")?;
    require("otp", &request.otp, "OTP is required")?;

    state
        .service
        .verify_otp(&request.mobile_number, &request.otp)
        .await?;
    Ok(message_response("OTP verified successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub user_id: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("userId", &request.user_id, "User ID is required")?;

    state.service.forgot_password(&request.user_id).await?;
    Ok(message_response("New password sent to your registered email"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: String,
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require("userId", &request.user_id, "User ID is required")?;
    require("oldPassword", &request.old_password, "Current password is required")?;
    require("newPassword", &request.new_password, "New password is required")?;

    state
        .service
        .change_password(&request.user_id, &request.old_password, &request.new_password)
        .await?;
    Ok(message_response("Password changed successfully"))
}
