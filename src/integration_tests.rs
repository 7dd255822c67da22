#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::actor_framework::Entity;
    use crate::app_system::{CanteenSystem, Settings};
    use crate::clients::{CatalogClient, OrderClient};
    use crate::domain::{CartError, CartItem, MenuItem, MenuItemDraft, Order, OrderStatus, Role, TransitionPolicy, User};
    use crate::menu_actor::CatalogError;
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get, expect_silence};
    use crate::order_actor::{OrderAction, OrderError};
    use crate::router::{AdminTab, View};
    use crate::session::{AccountDirectory, AuthUnavailable, Authenticator, Capability, SessionError, SessionGate};

    const STUDENT: (&str, &str) = ("student@college.com", "password123");
    const ADMIN: (&str, &str) = ("admin@college.com", "adminpassword");

    fn unseeded() -> Settings {
        Settings {
            seed_demo_data: false,
            ..Settings::default()
        }
    }

    fn idly_draft() -> MenuItemDraft {
        MenuItemDraft::new("Idly", Decimal::from(30), "Breakfast", "https://img.example/idly.jpg")
    }

    // -------------------------------------------------------------------------
    // Full flows against real store actors
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn student_places_an_order_from_the_cart() {
        let system = CanteenSystem::new(&unseeded());
        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap().unwrap();
        let idly = admin.create_menu_item(idly_draft()).await.unwrap();
        assert_eq!(idly.id, "1");

        let mut student = system.session();
        let user = student.login(STUDENT.0, STUDENT.1).await.unwrap().unwrap();
        assert_eq!(student.view(), View::Menu);

        student.add_to_cart(&idly).unwrap();
        student.add_to_cart(&idly).unwrap();
        assert_eq!(student.cart().quantity_of("1"), Some(2));
        assert_eq!(student.cart().total(), Decimal::from(60));

        let order = student.place_order().await.unwrap();
        assert_eq!(order.total, Decimal::from(60));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, user.id);
        assert_eq!(order.user_email, "student@college.com");
        assert!(student.cart().is_empty());
        assert_eq!(student.view(), View::MyOrders);

        let mine = student.my_orders().await.unwrap();
        assert_eq!(mine, vec![order]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_and_creates_nothing() {
        let system = CanteenSystem::new(&unseeded());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();

        let err = student.place_order().await.unwrap_err();
        assert!(matches!(err, SessionError::Order(OrderError::Validation(_))));
        assert!(system.order_client.list_all_orders().await.unwrap().is_empty());
        assert_eq!(student.view(), View::Menu);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn admin_cannot_place_orders() {
        let system = CanteenSystem::new(&Settings::default());
        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap().unwrap();
        assert_eq!(admin.view(), View::AdminDashboard(AdminTab::Orders));

        let err = admin.place_order().await.unwrap_err();
        assert_eq!(
            err,
            SessionError::RoleViolation {
                role: Role::Admin,
                capability: Capability::PlaceOrder
            }
        );
        let menu = admin.menu().await.unwrap();
        assert!(matches!(
            admin.add_to_cart(&menu[0]),
            Err(SessionError::RoleViolation { capability: Capability::ManageCart, .. })
        ));
        assert_eq!(system.order_client.list_all_orders().await.unwrap().len(), 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn bad_credentials_are_a_normal_outcome() {
        let system = CanteenSystem::new(&Settings::default());
        let mut session = system.session();

        assert_eq!(session.login(ADMIN.0, "wrong").await, Ok(None));
        assert_eq!(session.login("nobody@college.com", ADMIN.1).await, Ok(None));
        assert!(session.user().is_none());
        assert_eq!(session.view(), View::Login);
        assert_eq!(session.navigate(View::Menu), View::Login);
        assert_eq!(session.menu().await.unwrap_err(), SessionError::NotAuthenticated);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn students_cannot_touch_the_catalog_or_other_orders() {
        let system = CanteenSystem::new(&Settings::default());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();

        assert!(matches!(
            student.create_menu_item(idly_draft()).await,
            Err(SessionError::RoleViolation { capability: Capability::ManageCatalog, .. })
        ));
        assert!(matches!(
            student.delete_menu_item("1").await,
            Err(SessionError::RoleViolation { capability: Capability::ManageCatalog, .. })
        ));
        assert!(matches!(
            student.set_order_status("ord1", OrderStatus::Cancelled).await,
            Err(SessionError::RoleViolation { capability: Capability::ManageOrders, .. })
        ));
        assert!(matches!(
            student.all_orders().await,
            Err(SessionError::RoleViolation { capability: Capability::ManageOrders, .. })
        ));
        assert_eq!(system.catalog_client.list_menu_items().await.unwrap().len(), 7);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn orders_keep_their_snapshot_after_menu_changes() {
        let system = CanteenSystem::new(&Settings::default());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        student.add_to_cart_by_id("5").await.unwrap();
        student.add_to_cart_by_id("1").await.unwrap();
        let order = student.place_order().await.unwrap();
        assert_eq!(order.total, Decimal::from(110));

        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap();
        let mut rice = system.catalog_client.get_menu_item("5".into()).await.unwrap().unwrap();
        rice.price = Decimal::from(95);
        admin.update_menu_item(rice).await.unwrap();
        admin.delete_menu_item("1").await.unwrap();

        let stored = system.order_client.get_order(order.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored, order);
        assert_eq!(stored.items[0].item.price, Decimal::from(80));
        assert_eq!(stored.items[1].item.name, "Idly (2 pcs)");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn catalog_create_update_delete() {
        let system = CanteenSystem::new(&unseeded());
        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap();

        let mut negative = idly_draft();
        negative.price = Decimal::from(-5);
        assert!(matches!(
            admin.create_menu_item(negative).await,
            Err(SessionError::Catalog(CatalogError::Validation(_)))
        ));

        let a = admin.create_menu_item(idly_draft()).await.unwrap();
        let b = admin.create_menu_item(idly_draft()).await.unwrap();
        assert_ne!(a.id, b.id);

        let ghost = MenuItem { id: "404".into(), ..a.clone() };
        assert_eq!(
            admin.update_menu_item(ghost).await,
            Err(SessionError::Catalog(CatalogError::NotFound("404".into())))
        );

        admin.delete_menu_item(&a.id).await.unwrap();
        admin.delete_menu_item(&a.id).await.unwrap();
        let remaining = admin.menu().await.unwrap();
        assert_eq!(remaining, vec![b]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn unavailable_items_stay_out_of_the_cart() {
        let system = CanteenSystem::new(&Settings::default());
        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap();
        let sold_out = admin
            .create_menu_item(MenuItemDraft::new("Vada", Decimal::from(25), "Breakfast", "vada.jpg").unavailable())
            .await
            .unwrap();

        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        assert_eq!(
            student.add_to_cart(&sold_out),
            Err(SessionError::ItemUnavailable("Vada".into()))
        );
        assert!(matches!(
            student.add_to_cart_by_id("999").await,
            Err(SessionError::Catalog(CatalogError::NotFound(_)))
        ));
        assert!(student.cart().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn admin_moves_orders_through_the_workflow() {
        let settings = Settings {
            transition_policy: TransitionPolicy::ForwardOnly,
            ..Settings::default()
        };
        let system = CanteenSystem::new(&settings);
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        student.add_to_cart_by_id("2").await.unwrap();
        let order = student.place_order().await.unwrap();

        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap();

        assert_eq!(
            admin.set_order_status(&order.id, OrderStatus::Delivered).await,
            Err(SessionError::Order(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            }))
        );
        let preparing = admin.set_order_status(&order.id, OrderStatus::Preparing).await.unwrap();
        assert_eq!(preparing.status, OrderStatus::Preparing);
        let delivered = admin.set_order_status(&order.id, OrderStatus::Delivered).await.unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.total, order.total);

        assert!(admin.set_order_status(&order.id, OrderStatus::Cancelled).await.is_err());

        let seen_by_student = student.my_orders().await.unwrap();
        assert_eq!(seen_by_student[0].status, OrderStatus::Delivered);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_order_status_update_changes_nothing() {
        let system = CanteenSystem::new(&Settings::default());
        let mut admin = system.session();
        admin.login(ADMIN.0, ADMIN.1).await.unwrap();
        let before = admin.all_orders().await.unwrap();

        assert_eq!(
            admin.set_order_status("ord999", OrderStatus::Preparing).await,
            Err(SessionError::Order(OrderError::NotFound("ord999".into())))
        );
        assert_eq!(admin.all_orders().await.unwrap(), before);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn overflowing_order_is_rejected_and_the_store_keeps_serving() {
        let system = CanteenSystem::new(&Settings::default());
        let mut pricey = MenuItem::from_create_params("99".to_string(), idly_draft()).unwrap();
        pricey.price = Decimal::MAX;

        let err = system
            .order_client
            .place_order(
                "student1".into(),
                "student@college.com".into(),
                vec![CartItem::new(pricey, 2)],
                Decimal::MAX,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)), "{err:?}");

        let orders = system.order_client.list_all_orders().await.unwrap();
        assert_eq!(orders.len(), 1);

        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        student.add_to_cart_by_id("1").await.unwrap();
        // the rejected placement still consumed ord2
        assert_eq!(student.place_order().await.unwrap().id, "ord3");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn cart_limits_surface_as_session_errors() {
        let system = CanteenSystem::new(&Settings::default());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        student.add_to_cart_by_id("1").await.unwrap();

        assert!(matches!(
            student.update_cart("1", i64::MAX),
            Err(SessionError::Cart(CartError::QuantityLimit { .. }))
        ));
        assert_eq!(student.cart().quantity_of("1"), Some(1));
        assert_eq!(student.cart().total(), Decimal::from(30));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn listings_are_newest_first_with_unique_ids() {
        let system = CanteenSystem::new(&Settings::default());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();

        let mut placed = Vec::new();
        for item_id in ["1", "2", "3", "4"] {
            student.add_to_cart_by_id(item_id).await.unwrap();
            placed.push(student.place_order().await.unwrap().id);
        }

        let mine = student.my_orders().await.unwrap();
        let ids: Vec<_> = mine.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec!["ord5", "ord4", "ord3", "ord2", "ord1"]);
        assert_eq!(placed, vec!["ord2", "ord3", "ord4", "ord5"]);
        assert!(mine.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn logout_discards_user_and_cart() {
        let system = CanteenSystem::new(&Settings::default());
        let mut student = system.session();
        student.login(STUDENT.0, STUDENT.1).await.unwrap();
        student.add_to_cart_by_id("1").await.unwrap();
        student.update_cart("1", 4).unwrap();
        assert_eq!(student.cart().unit_count(), 4);

        student.logout();
        assert!(student.user().is_none());
        assert!(student.cart().is_empty());
        assert_eq!(student.view(), View::Login);
        assert_eq!(student.update_cart("1", 1), Err(SessionError::NotAuthenticated));

        system.shutdown().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Session behaviour against mocked stores
    // -------------------------------------------------------------------------

    struct MockedSession {
        session: crate::session::Session,
        catalog_rx: tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<MenuItem>>,
        order_rx: tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Order>>,
    }

    fn mocked_session(authenticator: Arc<dyn Authenticator>) -> MockedSession {
        let (catalog_inner, catalog_rx) = create_mock_client::<MenuItem>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);
        let session = crate::session::Session::new(
            SessionGate::new(authenticator, Duration::from_millis(100)),
            CatalogClient::new(catalog_inner),
            OrderClient::new(order_inner, TransitionPolicy::Permissive),
        );
        MockedSession {
            session,
            catalog_rx,
            order_rx,
        }
    }

    fn menu_item(id: &str, price: i64) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: format!("dish {id}"),
            price: Decimal::from(price),
            category: "Lunch".into(),
            image_url: "dish.jpg".into(),
            available: true,
        }
    }

    #[tokio::test]
    async fn test_order_placement_flow() {
        let MockedSession { mut session, mut order_rx, .. } = mocked_session(Arc::new(AccountDirectory::demo()));
        session.login(STUDENT.0, STUDENT.1).await.unwrap().unwrap();
        session.add_to_cart(&menu_item("5", 80)).unwrap();
        session.add_to_cart(&menu_item("6", 120)).unwrap();
        session.update_cart("5", 3).unwrap();

        let place_task = tokio::spawn(async move {
            let result = session.place_order().await;
            (session, result)
        });

        let (params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(params.user_id, "student1");
        assert_eq!(params.user_email, "student@college.com");
        assert_eq!(params.total, Decimal::from(360));
        assert_eq!(params.items.len(), 2);
        let order = Order::from_create_params("ord9".to_string(), params).unwrap();
        responder.send(Ok(order.clone())).unwrap();

        let (session, result) = place_task.await.unwrap();
        assert_eq!(result, Ok(order));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn failed_placement_keeps_the_cart() {
        let MockedSession { mut session, mut order_rx, .. } = mocked_session(Arc::new(AccountDirectory::demo()));
        session.login(STUDENT.0, STUDENT.1).await.unwrap();
        session.add_to_cart(&menu_item("5", 80)).unwrap();

        let place_task = tokio::spawn(async move {
            let result = session.place_order().await;
            (session, result)
        });

        let (_, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        drop(responder);

        let (session, result) = place_task.await.unwrap();
        let err = result.unwrap_err();
        assert!(err.is_retryable(), "{err:?}");
        assert_eq!(session.cart().quantity_of("5"), Some(1));
        assert_eq!(session.view(), View::Menu);
    }

    #[tokio::test]
    async fn admin_role_violation_never_reaches_the_store() {
        let MockedSession { mut session, mut order_rx, .. } = mocked_session(Arc::new(AccountDirectory::demo()));
        session.login(ADMIN.0, ADMIN.1).await.unwrap();

        assert!(matches!(session.place_order().await, Err(SessionError::RoleViolation { .. })));
        expect_silence(&mut order_rx);
    }

    #[tokio::test]
    async fn status_updates_carry_the_configured_policy() {
        let MockedSession { mut session, mut order_rx, .. } = mocked_session(Arc::new(AccountDirectory::demo()));
        session.login(ADMIN.0, ADMIN.1).await.unwrap();

        let task = tokio::spawn(async move { session.set_order_status("ord1", OrderStatus::Preparing).await });

        let (id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(id, "ord1");
        match action {
            OrderAction::SetStatus { status, policy } => {
                assert_eq!(status, OrderStatus::Preparing);
                assert_eq!(policy, TransitionPolicy::Permissive);
            }
        }
        responder.send(Err(OrderError::NotFound("ord1".into()))).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(SessionError::Order(OrderError::NotFound("ord1".into())))
        );
    }

    #[tokio::test]
    async fn add_by_id_fetches_the_current_snapshot() {
        let MockedSession { mut session, mut catalog_rx, .. } = mocked_session(Arc::new(AccountDirectory::demo()));
        session.login(STUDENT.0, STUDENT.1).await.unwrap();

        let task = tokio::spawn(async move {
            let result = session.add_to_cart_by_id("7").await;
            (session, result)
        });

        let (id, responder) = expect_get(&mut catalog_rx).await.expect("Expected MenuItem Get");
        assert_eq!(id, "7");
        responder.send(Ok(Some(menu_item("7", 100)))).unwrap();

        let (session, result) = task.await.unwrap();
        result.unwrap();
        assert_eq!(session.cart().total(), Decimal::from(100));
    }

    struct StalledAuthenticator;

    #[async_trait]
    impl Authenticator for StalledAuthenticator {
        async fn authenticate(&self, _email: &str, _password: &str) -> Result<Option<User>, AuthUnavailable> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }
    }

    struct DownAuthenticator;

    #[async_trait]
    impl Authenticator for DownAuthenticator {
        async fn authenticate(&self, _email: &str, _password: &str) -> Result<Option<User>, AuthUnavailable> {
            Err(AuthUnavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn slow_authentication_is_a_transport_fault() {
        let MockedSession { mut session, .. } = mocked_session(Arc::new(StalledAuthenticator));
        let err = session.login(STUDENT.0, STUDENT.1).await.unwrap_err();
        assert!(matches!(err, SessionError::TransportFault(ref msg) if msg.contains("timed out")));
        assert!(err.is_retryable());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn unreachable_authentication_is_a_transport_fault() {
        let MockedSession { mut session, .. } = mocked_session(Arc::new(DownAuthenticator));
        let err = session.login(STUDENT.0, STUDENT.1).await.unwrap_err();
        assert!(matches!(err, SessionError::TransportFault(ref msg) if msg.contains("connection refused")));
    }
}
