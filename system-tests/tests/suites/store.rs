// system-tests/tests/suites/store.rs
// ============================================================================
// Module: Store Group
// Description: Ordered contract scenarios for the /store resource.
// Purpose: Verify inventory, order placement, lookup, and deletion.
// Dependencies: system-tests helpers, petstore-client
// ============================================================================

//! ## Overview
//! Order 1 is placed early, read back through the poll helper, and deleted
//! last. Deliberately invalid orders are sent as raw JSON values so the typed
//! model never normalizes them.

use petstore_client::Order;
use petstore_client::OrderStatus;
use petstore_client::PollPolicy;
use petstore_client::Scenario;
use petstore_client::ScenarioGroup;
use petstore_client::eventually;
use serde_json::json;
use system_tests::artifacts::TestReporter;
use system_tests::bootstrap::bootstrap;

use crate::helpers::logging::init_logging;

const ORDER_ID: i64 = 1;
const ORDERED_PET: i64 = 123_450;
const SHIP_DATE: &str = "2025-11-08T16:07:21.524Z";

#[tokio::test(flavor = "multi_thread")]
async fn store_group() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let suite = bootstrap()?;
    let mut reporter = TestReporter::new("store", suite)?;
    let mut group = ScenarioGroup::new("store", suite.client()?);
    let policy = suite.poll(PollPolicy::from_secs(5, 1));

    group
        .run(
            Scenario::contract("inventory", "GET /store/inventory returns status counts"),
            |client| async move {
                client
                    .request()
                    .get("/store/inventory")
                    .await?
                    .expect_status(200)?
                    .expect_field_at_least("available", 0.0)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("place_order", "POST /store/order places a valid order"),
            |client| async move {
                let order = Order {
                    id: ORDER_ID,
                    pet_id: ORDERED_PET,
                    quantity: 2,
                    ship_date: Some(SHIP_DATE.to_string()),
                    status: OrderStatus::Placed,
                    complete: true,
                };
                client
                    .request()
                    .json(&order)
                    .post("/store/order")
                    .await?
                    .expect_status(200)?
                    .expect_field_eq("status", OrderStatus::Placed.as_str())?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "place_order_with_invalid_status",
                "POST /store/order rejects an unknown status with 400",
                "accepts the order and answers 200",
            ),
            |client| async move {
                let order = json!({
                    "id": 200,
                    "petId": ORDERED_PET,
                    "quantity": 1,
                    "shipDate": SHIP_DATE,
                    "status": "invalid",
                    "complete": true
                });
                client.request().json(&order).post("/store/order").await?.expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "place_order_with_negative_pet_id",
                "POST /store/order rejects petId -1 with 400",
                "accepts the order and answers 200",
            ),
            |client| async move {
                let order = json!({
                    "id": 2,
                    "petId": -1,
                    "quantity": 2,
                    "shipDate": SHIP_DATE,
                    "status": "placed",
                    "complete": true
                });
                client.request().json(&order).post("/store/order").await?.expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "place_order_with_malformed_body",
                "POST /store/order rejects malformed JSON with 400",
            ),
            |client| async move {
                client
                    .request()
                    .raw_json(
                        r#"{ "id": 2, "petId": 123450, "quantity": 2, "shipDate": , "status": "placed", "complete": true }"#,
                    )
                    .post("/store/order")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("get_order_by_id", "GET /store/order/{orderId} returns the order")
                .after("place_order"),
            |client| async move {
                eventually(policy, || {
                    let client = client.clone();
                    async move {
                        client
                            .request()
                            .path_param("orderId", ORDER_ID)
                            .get("/store/order/{orderId}")
                            .await?
                            .expect_status(200)?
                            .expect_field_eq("id", ORDER_ID)?;
                        Ok(())
                    }
                })
                .await
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "get_missing_order",
                "GET /store/order/{orderId} answers 404 for an unknown order",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("orderId", 9999)
                    .get("/store/order/{orderId}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "get_order_with_non_numeric_id",
                "GET /store/order/{orderId} rejects a non-numeric id",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("orderId", "MMM")
                    .get("/store/order/{orderId}")
                    .await?
                    .expect_status_in(&[400, 404])?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "delete_missing_order",
                "DELETE /store/order/{orderId} answers 404 for an unknown order",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("orderId", 99_999_999)
                    .delete("/store/order/{orderId}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "delete_order_with_negative_id",
                "DELETE /store/order/{orderId} rejects a negative id with 400",
                "answers 404 as for a missing order",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("orderId", -1)
                    .delete("/store/order/{orderId}")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("delete_order", "DELETE /store/order/{orderId} removes the order")
                .after("place_order"),
            |client| async move {
                eventually(policy, || {
                    let client = client.clone();
                    async move {
                        client
                            .request()
                            .path_param("orderId", ORDER_ID)
                            .delete("/store/order/{orderId}")
                            .await?
                            .expect_status(200)?;
                        Ok(())
                    }
                })
                .await
            },
        )
        .await;

    let client = group.client().clone();
    reporter.finish_group(&client, &group.finish(), suite.strict_discrepancies())?;
    Ok(())
}
