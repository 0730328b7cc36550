use super::*;
use crate::condition::Condition;
use crate::form::{serialize_submission, MemoryField, MemoryForm};
use crate::transport::{LookupError, LookupResponse, MockLookupTransport};
use async_trait::async_trait;
use serde_json::json;

fn response(values: serde_json::Value) -> LookupResponse {
    values.as_object().cloned().unwrap()
}

fn binder_with(
    form: &Arc<MemoryForm>,
    transport: impl LookupTransport + 'static,
    config: &EngineConfig,
) -> DependencyBinder {
    DependencyBinder::new(form.clone(), Arc::new(transport), config)
}

fn binder(form: &Arc<MemoryForm>, transport: impl LookupTransport + 'static) -> DependencyBinder {
    binder_with(form, transport, &EngineConfig::default())
}

fn no_lookups() -> MockLookupTransport {
    let mut transport = MockLookupTransport::new();
    transport.expect_lookup().never();
    transport
}

fn lookup(master: &str, slave: &str, url: &str) -> DependencyDeclaration {
    DependencyDeclaration::new(master, slave, Action::AjaxUpdate, Condition::Any).with_url(url)
}

/// Answers every lookup with `{"city": <value>-city}` after `delay`
struct SlowTransport {
    delay: Duration,
}

#[async_trait]
impl LookupTransport for SlowTransport {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        tokio::time::sleep(self.delay).await;
        Ok(response(json!({"city": format!("{}-city", request.value)})))
    }
}

mod ajax_update {
    use super::*;
    use pretty_assertions::assert_eq;

    fn country_form() -> (Arc<MemoryForm>, Arc<MemoryField>, Arc<MemoryField>) {
        let form = Arc::new(MemoryForm::new());
        let country = form.add(MemoryField::select("id_country", "country"));
        let city = form.add(MemoryField::text("id_city", "city"));
        city.set("Paris");
        (form, country, city)
    }

    #[tokio::test]
    async fn test_change_posts_value_and_applies_response() {
        let (form, country, city) = country_form();
        let loading_city = Arc::clone(&city);

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .withf(|request| request.url == "/cities" && request.value == "US")
            .returning(move |_| {
                assert!(loading_city.is_loading());
                Ok(response(json!({"city": "New York"})))
            });

        let mut binder = binder(&form, transport);
        assert!(binder.bind(&[lookup("country", "city", "/cities")]).is_empty());

        country.set("US");
        let tasks = binder.change("id_country");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].request().value, "US");
        assert_eq!(tasks[0].slave_ids(), vec!["id_city"]);
        assert!(city.is_loading());

        for task in tasks {
            assert!(matches!(task.run().await, LookupOutcome::Applied(1)));
        }
        assert_eq!(city.text_value(), "New York");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_empty_response_leaves_value_and_clears_loading() {
        let (form, country, city) = country_form();

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .returning(|_| Ok(LookupResponse::new()));

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);

        country.set("US");
        for task in binder.change("id_country") {
            assert!(matches!(task.run().await, LookupOutcome::Applied(0)));
        }
        assert_eq!(city.text_value(), "Paris");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_null_response_value_is_ignored() {
        let (form, country, city) = country_form();

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .returning(|_| Ok(response(json!({"city": null}))));

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);

        country.set("US");
        for task in binder.change("id_country") {
            task.run().await;
        }
        assert_eq!(city.text_value(), "Paris");
    }

    #[tokio::test]
    async fn test_failure_clears_loading_without_touching_value() {
        let (form, country, city) = country_form();

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .returning(|_| Err(LookupError::Status(500)));

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);

        country.set("US");
        for task in binder.change("id_country") {
            assert!(matches!(
                task.run().await,
                LookupOutcome::Failed(LookupError::Status(500))
            ));
        }
        assert_eq!(city.text_value(), "Paris");
        assert!(!city.is_loading());
    }

    /// Holds every lookup until the gate opens
    struct GatedTransport {
        gate: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl LookupTransport for GatedTransport {
        async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
            self.gate.notified().await;
            Ok(response(json!({"city": format!("{}-city", request.value)})))
        }
    }

    #[test]
    fn test_loading_held_while_request_in_flight() {
        let (form, country, city) = country_form();
        let gate = Arc::new(tokio::sync::Notify::new());
        let transport = GatedTransport {
            gate: Arc::clone(&gate),
        };

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);

        country.set("US");
        let mut tasks = binder.change("id_country");
        assert_eq!(tasks.len(), 1);
        let mut run = tokio_test::task::spawn(tasks.remove(0).run());

        tokio_test::assert_pending!(run.poll());
        assert!(city.is_loading());
        assert_eq!(city.text_value(), "Paris");

        gate.notify_one();
        assert!(run.is_woken());
        let outcome = tokio_test::assert_ready!(run.poll());
        assert!(matches!(outcome, LookupOutcome::Applied(1)));
        assert_eq!(city.text_value(), "US-city");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_shared_master_sends_one_request() {
        let form = Arc::new(MemoryForm::new());
        let kind = form.add(MemoryField::select("id_type", "type"));
        let price = form.add(MemoryField::text("id_price", "price"));
        let tax = form.add(MemoryField::text("id_tax", "tax"));

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .withf(|request| request.value == "laptop")
            .returning(|_| Ok(response(json!({"price": "999", "tax": "23%"}))));

        let mut binder = binder(&form, transport);
        binder.bind(&[
            lookup("type", "price", "/pricing"),
            lookup("type", "tax", "/pricing"),
        ]);
        assert_eq!(binder.registrations("id_type").len(), 2);

        kind.set("laptop");
        let tasks = binder.change("id_type");
        assert_eq!(tasks.len(), 1);
        for task in tasks {
            assert!(matches!(task.run().await, LookupOutcome::Applied(2)));
        }
        assert_eq!(price.text_value(), "999");
        assert_eq!(tax.text_value(), "23%");
    }

    #[tokio::test]
    async fn test_only_passing_slaves_are_batched() {
        let form = Arc::new(MemoryForm::new());
        let kind = form.add(MemoryField::select("id_type", "type"));
        let price = form.add(MemoryField::text("id_price", "price"));
        let warranty = form.add(MemoryField::text("id_warranty", "warranty"));

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .returning(|_| Ok(response(json!({"price": "10", "warranty": "2y"}))));

        let mut binder = binder(&form, transport);
        binder.bind(&[
            lookup("type", "price", "/pricing"),
            DependencyDeclaration::new(
                "type",
                "warranty",
                Action::AjaxUpdate,
                Condition::member_of(["laptop", "phone"]),
            )
            .with_url("/pricing"),
        ]);

        kind.set("cable");
        let tasks = binder.change("id_type");
        assert_eq!(tasks[0].slave_ids(), vec!["id_price"]);
        assert!(!warranty.is_loading());
        for task in tasks {
            task.run().await;
        }
        assert_eq!(price.text_value(), "10");
        assert_eq!(warranty.text_value(), "");
    }

    #[test]
    fn test_unmet_condition_sends_nothing() {
        let form = Arc::new(MemoryForm::new());
        let kind = form.add(MemoryField::select("id_type", "type"));
        let price = form.add(MemoryField::text("id_price", "price"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "type",
            "price",
            Action::AjaxUpdate,
            Condition::NotEmpty,
        )
        .with_url("/pricing")]);

        kind.set("");
        assert!(binder.change("id_type").is_empty());
        assert!(!price.is_loading());
    }

    #[test]
    fn test_page_load_only_runs_opted_in_slaves() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_type", "type")).set("laptop");
        form.add(MemoryField::text("id_price", "price"));
        let tax = form.add(MemoryField::text("id_tax", "tax"));

        let mut binder = binder(&form, no_lookups());
        let tasks = binder.bind(&[
            lookup("type", "price", "/pricing"),
            lookup("type", "tax", "/pricing").with_page_load_update(true),
        ]);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].slave_ids(), vec!["id_tax"]);
        assert_eq!(tasks[0].request().value, "laptop");
        assert!(tax.is_loading());
    }

    #[test]
    fn test_one_request_per_endpoint() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_type", "type"));
        form.add(MemoryField::text("id_price", "price"));
        form.add(MemoryField::text("id_stock", "stock"));
        form.add(MemoryField::text("id_tax", "tax"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[
            lookup("type", "price", "/pricing"),
            lookup("type", "stock", "/stock"),
            lookup("type", "tax", "/pricing"),
        ]);

        let tasks = binder.change("id_type");
        let batches: Vec<_> = tasks
            .iter()
            .map(|t| (t.request().url.clone(), t.slave_ids()))
            .collect();
        assert_eq!(
            batches,
            vec![
                (
                    "/pricing".to_string(),
                    vec!["id_price".to_string(), "id_tax".to_string()]
                ),
                ("/stock".to_string(), vec!["id_stock".to_string()]),
            ]
        );
    }

    #[tokio::test]
    async fn test_key_falls_back_to_unprefixed_id() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_country", "country")).set("PL");
        let city = form.add(MemoryField::new("id_city", None, FieldKind::Text));

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .returning(|_| Ok(response(json!({"city": "Warsaw"}))));

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);
        for task in binder.change("id_country") {
            task.run().await;
        }
        assert_eq!(city.text_value(), "Warsaw");
    }

    #[tokio::test]
    async fn test_select_slave_gets_options() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_person", "person")).set("7");
        let status = form.add(MemoryField::select("id_status", "status"));

        let mut transport = MockLookupTransport::new();
        transport.expect_lookup().returning(|_| {
            Ok(response(json!({
                "status": [3, [[1, "single"], [2, "widower"], [3, "married"]]]
            })))
        });

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("person", "status", "/status")]);
        for task in binder.change("id_person") {
            task.run().await;
        }
        assert_eq!(status.options().len(), 3);
        assert_eq!(status.text_value(), "3");
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    fn racing_transport() -> MockLookupTransport {
        let mut transport = MockLookupTransport::new();
        transport.expect_lookup().times(2).returning(|request| {
            let city = if request.value == "PL" { "Warsaw" } else { "New York" };
            Ok(response(json!({ "city": city })))
        });
        transport
    }

    fn setup(config: &EngineConfig) -> (DependencyBinder, Arc<MemoryField>, Arc<MemoryField>) {
        let form = Arc::new(MemoryForm::new());
        let country = form.add(MemoryField::select("id_country", "country"));
        let city = form.add(MemoryField::text("id_city", "city"));
        let mut binder = binder_with(&form, racing_transport(), config);
        binder.bind(&[lookup("country", "city", "/cities")]);
        (binder, country, city)
    }

    #[tokio::test]
    async fn test_late_response_overwrites_by_default() {
        let (binder, country, city) = setup(&EngineConfig::default());

        country.set("PL");
        let first = binder.change("id_country");
        country.set("US");
        let second = binder.change("id_country");

        for task in second.into_iter().chain(first) {
            assert!(matches!(task.run().await, LookupOutcome::Applied(1)));
        }
        assert_eq!(city.text_value(), "Warsaw");
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded_when_guarded() {
        let config = EngineConfig {
            discard_stale_responses: true,
            ..Default::default()
        };
        let (binder, country, city) = setup(&config);

        country.set("PL");
        let first = binder.change("id_country");
        country.set("US");
        let second = binder.change("id_country");

        for task in second {
            assert!(matches!(task.run().await, LookupOutcome::Applied(1)));
        }
        for task in first {
            assert!(matches!(task.run().await, LookupOutcome::Stale));
        }
        assert_eq!(city.text_value(), "New York");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_change_without_request_still_supersedes() {
        let form = Arc::new(MemoryForm::new());
        let country = form.add(MemoryField::select("id_country", "country"));
        let city = form.add(MemoryField::text("id_city", "city"));

        let mut transport = MockLookupTransport::new();
        transport
            .expect_lookup()
            .times(1)
            .returning(|_| Ok(response(json!({"city": "Warsaw"}))));

        let config = EngineConfig {
            discard_stale_responses: true,
            ..Default::default()
        };
        let mut binder = binder_with(&form, transport, &config);
        binder.bind(&[DependencyDeclaration::new(
            "country",
            "city",
            Action::AjaxUpdate,
            Condition::NotEmpty,
        )
        .with_url("/cities")]);

        country.set("PL");
        let first = binder.change("id_country");
        country.set("");
        assert!(binder.change("id_country").is_empty());

        for task in first {
            assert!(matches!(task.run().await, LookupOutcome::Stale));
        }
        assert_eq!(city.text_value(), "");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_timeout_clears_loading() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_country", "country")).set("PL");
        let city = form.add(MemoryField::text("id_city", "city"));
        let config = EngineConfig {
            lookup_timeout_ms: Some(10),
            ..Default::default()
        };
        let transport = SlowTransport {
            delay: Duration::from_millis(500),
        };

        let mut binder = binder_with(&form, transport, &config);
        binder.bind(&[lookup("country", "city", "/cities")]);

        for task in binder.change("id_country") {
            assert!(matches!(
                task.run().await,
                LookupOutcome::Failed(LookupError::Timeout(10))
            ));
        }
        assert_eq!(city.text_value(), "");
        assert!(!city.is_loading());
    }

    #[tokio::test]
    async fn test_spawned_changes_complete() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_country", "country")).set("PL");
        let city = form.add(MemoryField::text("id_city", "city"));
        let transport = SlowTransport {
            delay: Duration::from_millis(5),
        };

        let mut binder = binder(&form, transport);
        binder.bind(&[lookup("country", "city", "/cities")]);

        let handles = binder.spawn_change("id_country");
        assert_eq!(handles.len(), 1);
        for handle in handles {
            assert!(matches!(handle.await.unwrap(), LookupOutcome::Applied(1)));
        }
        assert_eq!(city.text_value(), "PL-city");
    }
}

mod sync_actions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_require_follows_condition() {
        let form = Arc::new(MemoryForm::new());
        let kind = form.add(MemoryField::select("id_kind", "kind"));
        let vat = form.add(MemoryField::text("id_vat", "vat"));
        kind.set("company");

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "kind",
            "vat",
            Action::Require,
            Condition::exact("company"),
        )]);
        assert!(vat.is_required());

        kind.set("person");
        binder.change("id_kind");
        assert!(!vat.is_required());
    }

    #[test]
    fn test_show_hides_and_disables() {
        let form = Arc::new(MemoryForm::new());
        let kind = form.add(MemoryField::select("id_kind", "kind"));
        let vat = form.add(MemoryField::text("id_vat", "vat"));
        kind.set("person");
        vat.set("PL123");

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "kind",
            "vat",
            Action::Show,
            Condition::exact("company"),
        )]);

        assert!(!vat.is_visible());
        assert!(!vat.is_enabled());
        assert_eq!(
            serialize_submission(&*form),
            vec![("kind".to_string(), "person".to_string())]
        );

        kind.set("company");
        binder.change("id_kind");
        assert!(vat.is_visible());
        assert!(vat.is_enabled());
        assert_eq!(serialize_submission(&*form).len(), 2);
    }

    #[test]
    fn test_clone_copies_on_user_change_only() {
        let form = Arc::new(MemoryForm::new());
        let billing = form.add(MemoryField::text("id_billing", "billing"));
        let shipping = form.add(MemoryField::text("id_shipping", "shipping"));
        billing.set("Main St 1");

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "billing",
            "shipping",
            Action::Clone,
            Condition::NotEmpty,
        )]);
        assert_eq!(shipping.text_value(), "");

        binder.change("id_billing");
        assert_eq!(shipping.text_value(), "Main St 1");

        billing.set("");
        binder.change("id_billing");
        assert_eq!(shipping.text_value(), "Main St 1");
    }

    #[test]
    fn test_clone_on_page_load_when_opted_in() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::text("id_billing", "billing")).set("Main St 1");
        let shipping = form.add(MemoryField::text("id_shipping", "shipping"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "billing",
            "shipping",
            Action::Clone,
            Condition::Any,
        )
        .with_page_load_update(true)]);
        assert_eq!(shipping.text_value(), "Main St 1");
    }

    #[test]
    fn test_clone_does_not_loop() {
        let form = Arc::new(MemoryForm::new());
        let left = form.add(MemoryField::text("id_left", "left"));
        let right = form.add(MemoryField::text("id_right", "right"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[
            DependencyDeclaration::new("left", "right", Action::Clone, Condition::Any),
            DependencyDeclaration::new("right", "left", Action::Clone, Condition::Any),
        ]);

        left.set("x");
        assert!(binder.change("id_left").is_empty());
        assert_eq!(right.text_value(), "x");
        assert_eq!(left.text_value(), "x");
    }

    #[test]
    fn test_clone_propagates_to_chained_lookup() {
        let form = Arc::new(MemoryForm::new());
        let source = form.add(MemoryField::text("id_source", "source"));
        form.add(MemoryField::text("id_copy", "copy"));
        form.add(MemoryField::text("id_derived", "derived"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[
            DependencyDeclaration::new("source", "copy", Action::Clone, Condition::Any),
            lookup("copy", "derived", "/derive"),
        ]);

        source.set("abc");
        let tasks = binder.change("id_source");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].request().value, "abc");
        assert_eq!(tasks[0].slave_ids(), vec!["id_derived"]);
    }

    #[test]
    fn test_clone_checkbox() {
        let form = Arc::new(MemoryForm::new());
        let a = form.add(MemoryField::checkbox("id_a", "a"));
        let b = form.add(MemoryField::checkbox("id_b", "b"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new("a", "b", Action::Clone, Condition::Any)]);

        a.set_checked(true);
        binder.change("id_a");
        assert!(b.is_checked());
    }
}

mod binding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_bind_nothing() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::text("id_kind", "kind"));

        let mut binder = binder(&form, no_lookups());
        let tasks = binder.bind(&[
            DependencyDeclaration::new("kind", "ghost", Action::Show, Condition::Any),
            DependencyDeclaration::new("ghost", "kind", Action::Show, Condition::Any),
        ]);
        assert!(tasks.is_empty());
        assert!(!binder.is_bound("id_kind"));
        assert!(!binder.is_bound("id_ghost"));
        assert!(binder.change("id_kind").is_empty());
    }

    #[test]
    fn test_lookup_without_url_is_skipped() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::text("id_kind", "kind"));
        let vat = form.add(MemoryField::text("id_vat", "vat"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[
            DependencyDeclaration::new("kind", "vat", Action::AjaxUpdate, Condition::Any),
            DependencyDeclaration::new("kind", "vat", Action::Require, Condition::Any),
        ]);
        assert!(binder.registrations("id_kind").is_empty());
        assert!(vat.is_required());
    }

    #[test]
    fn test_unknown_condition_does_not_stop_binding() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::text("id_kind", "kind")).set("x");
        let notes = form.add(MemoryField::text("id_notes", "notes"));
        let vat = form.add(MemoryField::text("id_vat", "vat"));

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[
            DependencyDeclaration::new(
                "kind",
                "notes",
                Action::Show,
                Condition::Unknown {
                    kind: "regex".to_string(),
                    args: Vec::new(),
                },
            ),
            DependencyDeclaration::new("kind", "vat", Action::Require, Condition::NotEmpty),
        ]);
        assert!(!notes.is_visible());
        assert!(vat.is_required());
    }

    #[test]
    fn test_repeated_blocks_bind_independently() {
        let form = Arc::new(MemoryForm::new());
        let first_kind = form.add(MemoryField::select("id_items-0-kind", "items-0-kind"));
        let first_size = form.add(MemoryField::text("id_items-0-size", "items-0-size"));
        let second_kind = form.add(MemoryField::select("id_items-1-kind", "items-1-kind"));
        let second_size = form.add(MemoryField::text("id_items-1-size", "items-1-size"));
        first_kind.set("shirt");
        second_kind.set("mug");

        let mut binder = binder(&form, no_lookups());
        binder.bind(&[DependencyDeclaration::new(
            "items-__prefix__-kind",
            "items-__prefix__-size",
            Action::Show,
            Condition::exact("shirt"),
        )]);

        assert!(binder.is_bound("id_items-0-kind"));
        assert!(binder.is_bound("id_items-1-kind"));
        assert!(first_size.is_visible());
        assert!(!second_size.is_visible());

        second_kind.set("shirt");
        binder.change("id_items-1-kind");
        assert!(second_size.is_visible());
    }

    #[test]
    fn test_page_load_fires_once_per_master() {
        let form = Arc::new(MemoryForm::new());
        form.add(MemoryField::select("id_type", "type")).set("laptop");
        form.add(MemoryField::text("id_price", "price"));
        form.add(MemoryField::text("id_tax", "tax"));

        let mut binder = binder(&form, no_lookups());
        let tasks = binder.bind(&[
            lookup("type", "price", "/pricing").with_page_load_update(true),
            lookup("type", "tax", "/pricing").with_page_load_update(true),
        ]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].slave_ids(), vec!["id_price", "id_tax"]);
    }

    #[test]
    fn test_unbound_field_change_is_ignored() {
        let form = Arc::new(MemoryForm::new());
        let binder = binder(&form, no_lookups());
        assert!(binder.dispatch("id_nothing", ChangeEvent::user()).is_empty());
    }
}
