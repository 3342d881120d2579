// src/common/extract.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::common::error::AppError;

// Variantes dos extratores do axum que rejeitam dentro do contrato de erro
// da API: corpo malformado, query inválida ou id fora do formato viram 400
// com `{message}`, nunca a rejeição padrão (422 em texto puro) do framework.

pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(valor)) => Ok(Json(valor)),
            Err(rejection) => Err(AppError::PayloadInvalido(rejection.body_text())),
        }
    }
}

// O mesmo tipo serve de resposta, delegando para o axum.
impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    axum::extract::Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(valor)) => Ok(Query(valor)),
            Err(rejection) => Err(AppError::PayloadInvalido(rejection.body_text())),
        }
    }
}

pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    axum::extract::Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(valor)) => Ok(Path(valor)),
            Err(rejection) => Err(AppError::PayloadInvalido(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::clientes::ListarClientesParams;
    use crate::models::auth::RegisterPayload;
    use axum::body::Body;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn corpo_sem_campo_obrigatorio_vira_400_no_contrato() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"email":"a@b.com","senha":"123456"}"#))
            .unwrap();

        let erro = Json::<RegisterPayload>::from_request(request, &())
            .await
            .err()
            .expect("corpo sem 'nome' deveria ser rejeitado");
        assert_eq!(erro.status_code(), StatusCode::BAD_REQUEST);

        // A resposta segue o contrato `{message}` da API.
        let resposta = erro.into_response();
        assert_eq!(resposta.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resposta.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn corpo_que_nem_e_json_vira_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("isso nao e json"))
            .unwrap();

        let erro = Json::<RegisterPayload>::from_request(request, &())
            .await
            .err()
            .expect("corpo não-JSON deveria ser rejeitado");
        assert_eq!(erro.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_com_enum_desconhecido_vira_400() {
        let (mut parts, _) = Request::builder()
            .uri("/api/clientes?status=NAO_EXISTE")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let erro = Query::<ListarClientesParams>::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("status desconhecido deveria ser rejeitado");
        assert_eq!(erro.status_code(), StatusCode::BAD_REQUEST);
    }
}
