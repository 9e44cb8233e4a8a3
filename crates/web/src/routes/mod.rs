use axum::Router;
use storage::Database;
use tower_http::trace::TraceLayer;

use crate::features::{athletes, categories, training_centers};

pub fn router(db: Database) -> Router {
    Router::new()
        .merge(categories::routes::routes())
        .merge(training_centers::routes::routes())
        .merge(athletes::routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    fn athlete_payload(name: &str, cpf: &str) -> Value {
        json!({
            "nome": name,
            "cpf": cpf,
            "idade": 25,
            "peso": 75.5,
            "altura": 1.75,
            "sexo": "M",
            "categoria": {"nome": "Scale"},
            "centro_treinamento": {"nome": "CT King"}
        })
    }

    async fn seeded_app() -> Router {
        let app = router(Database::in_memory().await.unwrap());
        let (status, _) = send(
            &app,
            Method::POST,
            "/categorias/",
            Some(json!({"nome": "Scale"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            &app,
            Method::POST,
            "/centro_treinamento/",
            Some(json!({
                "nome": "CT King",
                "endereco": "Rua X, 123",
                "proprietario": "Marcos"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        app
    }

    #[tokio::test]
    async fn category_lifecycle_over_http() {
        let app = router(Database::in_memory().await.unwrap());

        let (status, created) = send(
            &app,
            Method::POST,
            "/categorias/",
            Some(json!({"nome": "Scale"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["nome"], "Scale");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/categorias/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, listed) = send(&app, Method::GET, "/categorias/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_category_answers_see_other() {
        let app = seeded_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/categorias/",
            Some(json!({"nome": "Scale"})),
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(body["error"], "A category already exists with name: Scale");
    }

    #[tokio::test]
    async fn invalid_payload_is_a_bad_request() {
        let app = router(Database::in_memory().await.unwrap());

        let (status, body) = send(
            &app,
            Method::POST,
            "/categorias/",
            Some(json!({"nome": "Much too long"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn unknown_training_center_id_is_not_found() {
        let app = router(Database::in_memory().await.unwrap());

        let (status, _) = send(
            &app,
            Method::GET,
            "/centro_treinamento/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn athlete_with_unknown_category_is_a_bad_request() {
        let app = router(Database::in_memory().await.unwrap());

        let (status, body) = send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("João", "12345678901")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Category Scale not found");
    }

    #[tokio::test]
    async fn athlete_lifecycle_over_http() {
        let app = seeded_app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("João", "12345678901")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["categoria"]["nome"], "Scale");
        assert_eq!(created["peso"], 75.5);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("Outro", "12345678901")),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, updated) = send(
            &app,
            Method::PATCH,
            &format!("/atleta/{id}"),
            Some(json!({"idade": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["idade"], 30);
        assert_eq!(updated["nome"], "João");

        let (status, body) = send(&app, Method::DELETE, &format!("/atleta/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::DELETE, &format!("/atleta/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_shape_depends_on_filters() {
        let app = seeded_app().await;
        send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("Ana", "11111111111")),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("Bia", "22222222222")),
        )
        .await;

        let (status, all) = send(&app, Method::GET, "/atleta/", None).await;
        assert_eq!(status, StatusCode::OK);
        let first = all[0].as_object().unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.contains_key("nome"));
        assert!(first.contains_key("categoria"));
        assert!(first.contains_key("centro_treinamento"));

        // cpf matches Bia although the name filter matches nobody
        let (status, filtered) =
            send(&app, Method::GET, "/atleta/?nome=Zed&cpf=22222222222", None).await;
        assert_eq!(status, StatusCode::OK);
        let filtered = filtered.as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["nome"], "Bia");
        assert_eq!(filtered[0]["cpf"], "22222222222");

        let (status, _) = send(&app, Method::GET, "/atleta/?nome=&cpf=", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn name_filter_accepts_like_wildcards() {
        let app = seeded_app().await;
        send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("João", "11111111111")),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/atleta/",
            Some(athlete_payload("Maria", "22222222222")),
        )
        .await;

        // %25 is a literal '%' in the query string
        let (status, found) = send(&app, Method::GET, "/atleta/?nome=Jo%25o", None).await;

        assert_eq!(status, StatusCode::OK);
        let found = found.as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["nome"], "João");
    }

    #[tokio::test]
    async fn concurrent_creations_with_the_same_cpf_leave_one_athlete() {
        let app = seeded_app().await;

        let ((first, _), (second, _)) = tokio::join!(
            send(
                &app,
                Method::POST,
                "/atleta/",
                Some(athlete_payload("Ana", "11111111111")),
            ),
            send(
                &app,
                Method::POST,
                "/atleta/",
                Some(athlete_payload("Bia", "11111111111")),
            ),
        );

        let mut statuses = vec![first, second];
        statuses.sort();
        assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::SEE_OTHER]);

        let (_, found) = send(&app, Method::GET, "/atleta/?cpf=11111111111", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_athlete_listing_is_not_found() {
        let app = seeded_app().await;

        let (status, body) = send(&app, Method::GET, "/atleta", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No athletes found for the given filters");
    }
}
