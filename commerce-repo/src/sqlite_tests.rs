//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use commerce_types::{
        Amount, CommerceRepository, DomainError, Member, MemberId, Order, OrderStatus, Payment,
        PaymentId, PaymentMethod, PaymentStatus, RepoError,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn member(name: &str, email: &str) -> Member {
        Member::new(name.to_string(), email.to_string(), Utc::now()).unwrap()
    }

    fn order(member_id: MemberId, amount: f64) -> Order {
        Order::new(member_id, Amount::from_major(amount).unwrap(), Utc::now())
    }

    fn payment(order: &Order) -> Payment {
        Payment::request(order, order.amount, PaymentMethod::Card, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_member() {
        let repo = setup_repo().await;

        let created = member("Alice", "alice@example.com");
        repo.insert_member(&created).await.unwrap();

        let fetched = repo.get_member(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_member_not_found() {
        let repo = setup_repo().await;

        let result = repo.get_member(MemberId::new()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_constraint() {
        let repo = setup_repo().await;

        repo.insert_member(&member("Alice", "alice@example.com"))
            .await
            .unwrap();

        let result = repo
            .insert_member(&member("Other Alice", "alice@example.com"))
            .await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::DuplicateEmail(_)))
        ));
    }

    #[tokio::test]
    async fn test_find_member_by_email() {
        let repo = setup_repo().await;

        let created = member("Bob", "bob@example.com");
        repo.insert_member(&created).await.unwrap();

        let found = repo
            .find_member_by_email("bob@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);

        let missing = repo.find_member_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_and_get_order() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();

        let created = order(m.id, 50000.0);
        repo.insert_order(&created).await.unwrap();

        let fetched = repo.get_order(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.member_id, m.id);
        assert_eq!(fetched.status, OrderStatus::Created);
        assert_eq!(fetched.amount.minor(), 5_000_000);
    }

    #[tokio::test]
    async fn test_list_orders_for_member_newest_first() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();

        let t1 = Utc.with_ymd_and_hms(2025, 10, 3, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap();

        let older = Order::new(m.id, Amount::from_major(100.0).unwrap(), t1);
        let newer = Order::new(m.id, Amount::from_major(200.0).unwrap(), t2);
        repo.insert_order(&older).await.unwrap();
        repo.insert_order(&newer).await.unwrap();

        let orders = repo.list_orders_for_member(m.id).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, newer.id);
        assert_eq!(orders[1].id, older.id);
    }

    #[tokio::test]
    async fn test_insert_payment_and_find_for_order() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();
        let o = order(m.id, 42000.0);
        repo.insert_order(&o).await.unwrap();

        let p = payment(&o);
        repo.insert_payment(&p).await.unwrap();

        let fetched = repo.get_payment(p.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, PaymentStatus::Requested);
        assert!(fetched.approved_at.is_none());

        let by_order = repo.find_payment_for_order(o.id).await.unwrap().unwrap();
        assert_eq!(by_order.id, p.id);
    }

    #[tokio::test]
    async fn test_second_payment_for_order_rejected_by_constraint() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();
        let o = order(m.id, 42000.0);
        repo.insert_order(&o).await.unwrap();

        repo.insert_payment(&payment(&o)).await.unwrap();
        let result = repo.insert_payment(&payment(&o)).await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::DuplicatePayment(_)))
        ));
    }

    #[tokio::test]
    async fn test_approve_payment_completes_order() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();
        let o = order(m.id, 50000.0);
        repo.insert_order(&o).await.unwrap();
        let p = payment(&o);
        repo.insert_payment(&p).await.unwrap();

        let approved_at = Utc.with_ymd_and_hms(2025, 10, 3, 12, 30, 0).unwrap();
        let approved = repo.approve_payment(p.id, approved_at).await.unwrap();

        assert_eq!(approved.status, PaymentStatus::Approved);
        assert_eq!(approved.approved_at, Some(approved_at));

        // Both rows committed together.
        let stored_payment = repo.get_payment(p.id).await.unwrap().unwrap();
        assert_eq!(stored_payment.status, PaymentStatus::Approved);
        assert_eq!(stored_payment.approved_at, Some(approved_at));

        let stored_order = repo.get_order(o.id).await.unwrap().unwrap();
        assert_eq!(stored_order.status, OrderStatus::Paid);
        assert_eq!(stored_order.amount.minor(), 5_000_000);
    }

    #[tokio::test]
    async fn test_approve_payment_twice_fails() {
        let repo = setup_repo().await;

        let m = member("Alice", "alice@example.com");
        repo.insert_member(&m).await.unwrap();
        let o = order(m.id, 42000.0);
        repo.insert_order(&o).await.unwrap();
        let p = payment(&o);
        repo.insert_payment(&p).await.unwrap();

        repo.approve_payment(p.id, Utc::now()).await.unwrap();
        let result = repo.approve_payment(p.id, Utc::now()).await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::AlreadyProcessed))
        ));

        // Order stays PAID, untouched by the failed second approval.
        let stored_order = repo.get_order(o.id).await.unwrap().unwrap();
        assert_eq!(stored_order.status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn test_approve_payment_not_found() {
        let repo = setup_repo().await;

        let result = repo.approve_payment(PaymentId::new(), Utc::now()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
