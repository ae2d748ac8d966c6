//! Single-record CRUD integration tests

#[cfg(test)]
mod tests {
    use crate::common::{Account, MockWebApi};
    use crate::{assert_err, assert_ok};
    use dataverse_client::{DataverseError, SerializerOptions};
    use uuid::Uuid;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_create_then_delete() {
        let api = MockWebApi::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path(api.path("accounts")))
            .and(body_json(serde_json::json!({ "name": "Contoso", "revenue": 1000.0 })))
            .respond_with(
                ResponseTemplate::new(204)
                    .insert_header("OData-EntityId", api.link(&format!("accounts({})", id)).as_str()),
            )
            .expect(1)
            .mount(&api.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(api.path(&format!("accounts({})", id))))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&api.server)
            .await;

        let client = api.client();
        let mut account = Account::new("Contoso");
        account.revenue = Some(1000.0);

        let created = assert_ok!(client.create(&account).await);
        assert_eq!(created, id);

        account.accountid = Some(created);
        assert_ok!(client.delete(&account).await);
    }

    #[tokio::test]
    async fn test_update_with_explicit_nulls() {
        let api = MockWebApi::start().await;
        let account = Account::existing("Cleared");

        Mock::given(method("PATCH"))
            .and(path(api.path(&format!("accounts({})", account.accountid.unwrap()))))
            .and(body_json(serde_json::json!({
                "accountid": account.accountid,
                "name": "Cleared",
                "revenue": null
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&api.server)
            .await;

        let client = api.client().with_serializer_options(SerializerOptions::keep_nulls());
        assert_ok!(client.update(&account).await);
    }

    #[tokio::test]
    async fn test_upsert_returns_id() {
        let api = MockWebApi::start().await;
        let account = Account::existing("Upsert");
        let id = account.accountid.unwrap();

        Mock::given(method("PATCH"))
            .and(path(api.path(&format!("accounts({})", id))))
            .respond_with(
                ResponseTemplate::new(204)
                    .insert_header("OData-EntityId", api.link(&format!("accounts({})", id)).as_str()),
            )
            .expect(1)
            .mount(&api.server)
            .await;

        assert_eq!(assert_ok!(api.client().upsert(&account).await), id);
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let api = MockWebApi::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(412).set_body_json(serde_json::json!({
                "error": { "code": "0x80040237", "message": "A record with matching key values already exists." }
            })))
            .mount(&api.server)
            .await;

        let err = assert_err!(api.client().create(&Account::new("Dup")).await);
        match err {
            DataverseError::RemoteApi { status, message } => {
                assert_eq!(status, 412);
                assert_eq!(message, "A record with matching key values already exists.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let api = MockWebApi::start().await;
        let err = assert_err!(api.client().delete(&Account::new("no id")).await);
        assert!(matches!(
            err,
            DataverseError::MissingMetadata {
                attribute: "row id",
                ..
            }
        ));
    }
}
