//! Bill-creation transaction tests
//!
//! These run the coordinator against the in-memory adapters, covering the
//! money arithmetic, fail-fast validation, numbering, and atomicity
//! behavior of the billing core.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

use core_kernel::{BillNumber, Money};
use domain_billing::ports::mock::InMemoryBillLedger;
use domain_billing::{
    BillItemRequest, BillLedger, BillNumberAllocator, BillingError, BillingService, ErrorCategory,
    LedgerError,
};
use domain_catalog::ports::mock::InMemoryCatalogStore;
use domain_catalog::{CatalogService, NewItem};
use domain_customer::ports::mock::InMemoryCustomerStore;
use domain_customer::{CustomerService, NewCustomer};

struct Fixture {
    billing: BillingService,
    ledger: Arc<InMemoryBillLedger>,
    catalog: CatalogService,
}

/// Seeds five customers (so `ACC000005` exists) and three items; item 3 is
/// `BK-100` at 25.00, active.
async fn fixture() -> Fixture {
    let customers = Arc::new(InMemoryCustomerStore::new());
    let catalog_store = Arc::new(InMemoryCatalogStore::new());
    let ledger = Arc::new(InMemoryBillLedger::new());

    let customer_svc = CustomerService::new(customers.clone());
    for name in ["One", "Two", "Three", "Four", "Five"] {
        customer_svc.create(NewCustomer::new(name)).await.unwrap();
    }

    let catalog_svc = CatalogService::new(catalog_store.clone());
    catalog_svc
        .create(NewItem::new("PEN-01", "Ballpoint Pen", Money::new(dec!(0.50))))
        .await
        .unwrap();
    catalog_svc
        .create(NewItem::new("NB-20", "Notebook", Money::new(dec!(5.00))))
        .await
        .unwrap();
    catalog_svc
        .create(NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(25.00))))
        .await
        .unwrap();

    Fixture {
        billing: BillingService::new(customers, catalog_store, ledger.clone(), ledger.clone()),
        ledger,
        catalog: catalog_svc,
    }
}

#[tokio::test]
async fn known_customer_and_item_produce_a_bill() {
    let fx = fixture().await;

    let bill_no = fx
        .billing
        .create_bill("ACC000005", &[BillItemRequest { item_id: 3, qty: 2 }])
        .await
        .unwrap();

    let s = bill_no.as_str();
    assert!(s.starts_with("BILL-") && s.len() == 11);

    let bill = fx
        .billing
        .find_by_bill_number(s)
        .await
        .unwrap()
        .expect("bill should be persisted");
    assert_eq!(bill.total, Money::new(dec!(50.00)));
    assert_eq!(bill.customer_account.as_str(), "ACC000005");
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].line_total, Money::new(dec!(50.00)));
}

#[tokio::test]
async fn maximum_priced_line_at_maximum_quantity_is_accepted() {
    let fx = fixture().await;
    fx.catalog
        .create(NewItem::new(
            "MAX-01",
            "Priciest Item",
            Money::new(dec!(99999999.99)),
        ))
        .await
        .unwrap();

    let bill_no = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 4, qty: 9999 }])
        .await
        .unwrap();

    let bill = fx
        .billing
        .find_by_bill_number(bill_no.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bill.total, Money::new(dec!(999899999900.01)));
    assert_eq!(bill.items[0].line_total, bill.total);
}

#[tokio::test]
async fn grand_total_is_exact_sum_of_line_totals() {
    let fx = fixture().await;
    let customers_bill = fx
        .billing
        .create_bill(
            "ACC000001",
            &[
                BillItemRequest { item_id: 3, qty: 2 },  // 25.00 x 2 = 50.00
                BillItemRequest { item_id: 2, qty: 3 },  // 5.00 x 3 = 15.00
                BillItemRequest { item_id: 1, qty: 4 },  // 0.50 x 4 = 2.00
            ],
        )
        .await
        .unwrap();

    let bill = fx
        .billing
        .find_by_bill_number(customers_bill.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bill.total, Money::new(dec!(67.00)));

    let line_sum: Money = bill.items.iter().map(|i| i.line_total).sum();
    assert_eq!(bill.total, line_sum);
}

#[tokio::test]
async fn inactive_item_is_rejected_with_nothing_persisted() {
    let fx = fixture().await;
    let item = fx.catalog.find_by_sku("BK-100").await.unwrap().unwrap();
    fx.catalog.deactivate(item.id).await.unwrap();

    let err = fx
        .billing
        .create_bill("ACC000005", &[BillItemRequest { item_id: 3, qty: 2 }])
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::ItemNotActive { .. }));
    assert_eq!(err.category(), ErrorCategory::NotFound);

    // The candidate number was never used.
    assert!(fx
        .billing
        .find_by_bill_number("BILL-000001")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn unknown_item_and_unknown_customer_are_entity_errors() {
    let fx = fixture().await;

    let err = fx
        .billing
        .create_bill("ACC000005", &[BillItemRequest { item_id: 99, qty: 1 }])
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::ItemNotFound(_)));

    let err = fx
        .billing
        .create_bill("ACC000099", &[BillItemRequest { item_id: 3, qty: 1 }])
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::CustomerNotFound(_)));

    // Malformed account numbers behave like unknown ones.
    let err = fx
        .billing
        .create_bill("not-an-account", &[BillItemRequest { item_id: 3, qty: 1 }])
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::CustomerNotFound(_)));

    assert!(fx
        .billing
        .find_by_bill_number("BILL-000001")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn out_of_range_quantity_fails_before_any_lookup() {
    let fx = fixture().await;

    for qty in [0i64, -1, 10_000] {
        let err = fx
            .billing
            .create_bill("ACC000005", &[BillItemRequest { item_id: 3, qty }])
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidInput, "qty={qty}");
    }
}

#[tokio::test]
async fn unit_price_is_a_snapshot() {
    let fx = fixture().await;

    let bill_no = fx
        .billing
        .create_bill("ACC000002", &[BillItemRequest { item_id: 3, qty: 1 }])
        .await
        .unwrap();

    // Reprice the item after the bill exists.
    let item = fx.catalog.find_by_sku("BK-100").await.unwrap().unwrap();
    fx.catalog
        .update(item.id, NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(99.99))))
        .await
        .unwrap();

    let bill = fx
        .billing
        .find_by_bill_number(bill_no.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bill.items[0].unit_price, Money::new(dec!(25.00)));
    assert_eq!(bill.total, Money::new(dec!(25.00)));
}

#[tokio::test]
async fn find_by_bill_number_round_trips_line_totals() {
    let fx = fixture().await;
    fx.catalog
        .create(NewItem::new("BK-200", "Advanced Rust", Money::new(dec!(12.50))))
        .await
        .unwrap();

    let bill_no = fx
        .billing
        .create_bill("ACC000003", &[BillItemRequest { item_id: 4, qty: 3 }])
        .await
        .unwrap();

    let bill = fx
        .billing
        .find_by_bill_number(bill_no.as_str())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bill.total, Money::new(dec!(37.50)));
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].line_total, Money::new(dec!(37.50)));
}

#[tokio::test]
async fn deleting_a_bill_removes_its_line_items() {
    let fx = fixture().await;

    let bill_no = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 2 }])
        .await
        .unwrap();
    let bill = fx
        .billing
        .find_by_bill_number(bill_no.as_str())
        .await
        .unwrap()
        .unwrap();

    fx.billing.delete_bill(bill.id).await.unwrap();

    assert!(fx
        .billing
        .find_by_bill_number(bill_no.as_str())
        .await
        .unwrap()
        .is_none());
    assert!(fx.billing.find_by_id(bill.id).await.unwrap().is_none());

    let err = fx.billing.delete_bill(bill.id).await.unwrap_err();
    assert!(matches!(err, BillingError::BillNotFound(_)));
}

#[tokio::test]
async fn numbers_are_not_wasted_on_validation_failures() {
    let fx = fixture().await;

    let _ = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 99, qty: 1 }])
        .await
        .unwrap_err();

    let bill_no = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();
    assert_eq!(bill_no.as_str(), "BILL-000001");
}

#[tokio::test]
async fn deleting_the_highest_bill_frees_its_number() {
    let fx = fixture().await;

    let first = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();
    let second = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();
    assert_eq!(first.as_str(), "BILL-000001");
    assert_eq!(second.as_str(), "BILL-000002");

    let bill = fx
        .billing
        .find_by_bill_number(second.as_str())
        .await
        .unwrap()
        .unwrap();
    fx.billing.delete_bill(bill.id).await.unwrap();

    // Max+1 allocation means the freed number is handed out again.
    let third = fx
        .billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();
    assert_eq!(third.as_str(), "BILL-000002");
}

/// Allocator that replays a fixed sequence of candidates, simulating a
/// concurrent allocation handing out an already-taken number.
struct ScriptedAllocator {
    sequence: Mutex<Vec<BillNumber>>,
}

#[async_trait]
impl BillNumberAllocator for ScriptedAllocator {
    async fn next(&self) -> Result<BillNumber, LedgerError> {
        let mut seq = self.sequence.lock().await;
        if seq.is_empty() {
            return Err(LedgerError::storage("allocator script exhausted"));
        }
        Ok(seq.remove(0))
    }
}

#[tokio::test]
async fn duplicate_bill_number_is_reallocated_and_retried() {
    let customers = Arc::new(InMemoryCustomerStore::new());
    CustomerService::new(customers.clone())
        .create(NewCustomer::new("Only"))
        .await
        .unwrap();
    let catalog_store = Arc::new(InMemoryCatalogStore::new());
    CatalogService::new(catalog_store.clone())
        .create(NewItem::new("PEN-01", "Pen", Money::new(dec!(1.00))))
        .await
        .unwrap();

    let ledger = Arc::new(InMemoryBillLedger::new());

    // Occupy BILL-000001 directly in the ledger.
    let seed = BillingService::new(
        customers.clone(),
        catalog_store.clone(),
        ledger.clone(),
        ledger.clone(),
    );
    seed.create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();

    // This coordinator's allocator first hands out the taken number.
    let stale = Arc::new(ScriptedAllocator {
        sequence: Mutex::new(vec![
            BillNumber::from_suffix(1),
            BillNumber::from_suffix(2),
        ]),
    });
    let billing = BillingService::new(customers, catalog_store, stale, ledger.clone());

    let bill_no = billing
        .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
        .await
        .unwrap();
    assert_eq!(bill_no.as_str(), "BILL-000002");
}

#[tokio::test]
async fn concurrent_creates_never_share_a_bill_number() {
    let fx = fixture().await;
    let billing = Arc::new(fx.billing);

    let a = {
        let billing = billing.clone();
        tokio::spawn(async move {
            billing
                .create_bill("ACC000001", &[BillItemRequest { item_id: 1, qty: 1 }])
                .await
        })
    };
    let b = {
        let billing = billing.clone();
        tokio::spawn(async move {
            billing
                .create_bill("ACC000002", &[BillItemRequest { item_id: 2, qty: 1 }])
                .await
        })
    };

    let first = a.await.unwrap().unwrap();
    let second = b.await.unwrap().unwrap();
    assert_ne!(first, second);

    // Both bills are retrievable under their own numbers.
    assert!(fx
        .ledger
        .find_by_bill_number(&first)
        .await
        .unwrap()
        .is_some());
    assert!(fx
        .ledger
        .find_by_bill_number(&second)
        .await
        .unwrap()
        .is_some());
}
