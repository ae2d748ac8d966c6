//! Batch wire format tests
//!
//! Byte-level checks of the composed `$batch` body and its execution.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::Unmapped;
    use crate::common::{Account, Contact, MockWebApi};
    use crate::{assert_err, assert_ok};
    use dataverse_client::{
        Action, Batch, BatchItem, ChangeRequest, ChangeSet, ComposeContext, Composable,
        DataverseError, RetrieveRequest, SerializerOptions,
    };
    use url::Url;
    use uuid::Uuid;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const ROOT: &str = "https://org.crm.dynamics.com/api/data/v9.2/";

    fn compose_text<C: Composable>(item: &C) -> String {
        let root = Url::parse(ROOT).unwrap();
        let options = SerializerOptions::default();
        let part = assert_ok!(item.compose(&ComposeContext::new(&root, &options)));
        String::from_utf8(part.body().to_vec()).unwrap()
    }

    fn sample_batch(contact: &Contact) -> Batch {
        let mut changeset = ChangeSet::new().with_id("c");
        changeset.add(ChangeRequest::create(Account::new("A")).with_id("1"));
        changeset.add(ChangeRequest::delete(contact.clone()).with_id("2"));

        let mut batch = Batch::new().with_id("b");
        batch.add(changeset);
        batch
    }

    /// Full envelope for a changeset mixing two row types
    #[test]
    fn test_envelope_bytes() {
        let contact = Contact::existing("L");
        let id = contact.contactid.unwrap();

        let expected = format!(
            "--batch_b\r\n\
             Content-Type: multipart/mixed;boundary=changeset_c\r\n\
             \r\n\
             --changeset_c\r\n\
             Content-Type: application/http\r\n\
             Content-Transfer-Encoding: binary\r\n\
             Content-ID: 1\r\n\
             \r\n\
             POST {root}accounts HTTP/1.1\r\n\
             Content-Type: application/json;type=entry\r\n\
             \r\n\
             {{\"name\":\"A\"}}\r\n\
             --changeset_c\r\n\
             Content-Type: application/http\r\n\
             Content-Transfer-Encoding: binary\r\n\
             Content-ID: 2\r\n\
             \r\n\
             DELETE {root}contacts({id}) HTTP/1.1\r\n\
             Content-Type: application/json;type=entry\r\n\
             \r\n\
             {{\"contactid\":\"{id}\",\"lastname\":\"L\"}}\r\n\
             --changeset_c--\r\n\
             \r\n\
             --batch_b--\r\n",
            root = ROOT,
            id = id
        );

        assert_eq!(compose_text(&sample_batch(&contact)), expected);
    }

    /// Update and upsert put the same request on the wire
    #[test]
    fn test_update_and_upsert_identical() {
        let account = Account::existing("Same");
        let update = compose_text(&ChangeRequest::update(account.clone()).with_id("1"));
        let upsert = compose_text(&ChangeRequest::upsert(account).with_id("1"));
        assert_eq!(update, upsert);
        assert!(update.starts_with("PATCH "));
    }

    #[test]
    fn test_action_resolution() {
        let account = Account::existing("x");
        let id = account.accountid.unwrap();

        let (method, path) = assert_ok!(Action::Create.resolve(&account));
        assert_eq!((method.as_str(), path.as_str()), ("POST", "accounts"));

        let keyed = format!("accounts({})", id);
        for action in [Action::Update, Action::Upsert] {
            let (method, path) = assert_ok!(action.resolve(&account));
            assert_eq!((method.as_str(), path.as_str()), ("PATCH", keyed.as_str()));
        }

        let (method, path) = assert_ok!(Action::Delete.resolve(&account));
        assert_eq!((method.as_str(), path.as_str()), ("DELETE", keyed.as_str()));

        let err = assert_err!("merge".parse::<Action>());
        assert!(matches!(err, DataverseError::UnsupportedAction(_)));
        assert_eq!(assert_ok!("upsert".parse::<Action>()), Action::Upsert);
    }

    #[test]
    fn test_missing_metadata_surfaces_on_compose() {
        let mut batch = Batch::new();
        batch.add(ChangeRequest::update(Account::new("no id")));
        let root = Url::parse(ROOT).unwrap();
        let options = SerializerOptions::default();

        let err = assert_err!(batch.compose(&ComposeContext::new(&root, &options)));
        assert!(err.is_metadata_error());

        let mut batch = Batch::new();
        batch.add(ChangeRequest::create(Unmapped { id: Some(Uuid::new_v4()) }));
        let err = assert_err!(batch.compose(&ComposeContext::new(&root, &options)));
        assert!(matches!(
            err,
            DataverseError::MissingMetadata {
                attribute: "logical collection name",
                ..
            }
        ));
    }

    #[test]
    fn test_batch_items_in_order() {
        let mut batch = Batch::new().with_id("order");
        batch.add(ChangeRequest::create(Account::new("standalone")).with_id("s"));
        batch.add(ChangeSet::new().with_id("empty"));
        batch.add(RetrieveRequest::collection::<Contact>("?$top=5"));

        let id_before = batch.id().to_string();
        batch.add_all(Vec::<BatchItem>::new());
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.id(), id_before);

        let kinds: Vec<&str> = batch
            .iter()
            .map(|item| match item {
                BatchItem::Request(_) => "request",
                BatchItem::ChangeSet(_) => "changeset",
                BatchItem::Query(_) => "query",
            })
            .collect();
        assert_eq!(kinds, vec!["request", "changeset", "query"]);

        let text = compose_text(&batch);
        let standalone = text.find("POST ").unwrap();
        let changeset = text.find("boundary=changeset_empty").unwrap();
        let query = text
            .find(&format!("GET {}contacts?$top=5 HTTP/1.1", ROOT))
            .unwrap();
        assert!(standalone < changeset && changeset < query);
        assert_eq!(text.matches("--batch_order\r\n").count(), 3);
    }

    #[tokio::test]
    async fn test_execute_batch_sends_composed_body() {
        let api = MockWebApi::start().await;
        let client = api.client();
        let contact = Contact::existing("L");
        let batch = sample_batch(&contact);

        let envelope = assert_ok!(batch.compose_with(&client));
        let expected_body = String::from_utf8(envelope.body().to_vec()).unwrap();

        Mock::given(method("POST"))
            .and(path(api.path("$batch")))
            .and(header("Content-Type", "multipart/mixed;boundary=batch_b"))
            .and(body_string(expected_body))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&api.server)
            .await;

        assert_ok!(client.execute_batch(&batch).await);
    }

    #[tokio::test]
    async fn test_execute_batch_aggregate_failure() {
        let api = MockWebApi::start().await;

        Mock::given(method("POST"))
            .and(path(api.path("$batch")))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&api.server)
            .await;

        let contact = Contact::existing("L");
        let err = assert_err!(api.client().execute_batch(&sample_batch(&contact)).await);
        match err {
            DataverseError::RemoteApi { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
