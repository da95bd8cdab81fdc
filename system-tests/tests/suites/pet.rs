// system-tests/tests/suites/pet.rs
// ============================================================================
// Module: Pet Group
// Description: Ordered contract scenarios for the /pet resource.
// Purpose: Verify create, read, update, upload, search, and delete of pets.
// Dependencies: system-tests helpers, petstore-client
// ============================================================================

//! ## Overview
//! Pet 123450 ("Igor") is created first and reused by the update, upload,
//! and delete scenarios. Pet 123321000 ("Barbos") is created and read back
//! inside one scenario. Ids 999990999 and 678678210 are assumed absent.

use petstore_client::ApiMessage;
use petstore_client::Pet;
use petstore_client::PetStatus;
use petstore_client::PetstoreError;
use petstore_client::Scenario;
use petstore_client::ScenarioGroup;
use serde_json::json;
use system_tests::artifacts::TestReporter;
use system_tests::bootstrap::bootstrap;

use crate::helpers::logging::init_logging;

const IGOR: i64 = 123_450;
const BARBOS: i64 = 123_321_000;
const MISSING_PET: i64 = 999_990_999;
const FORM_PET: i64 = 678_678_210;

#[tokio::test(flavor = "multi_thread")]
async fn pet_group() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let suite = bootstrap()?;
    let mut reporter = TestReporter::new("pet", suite)?;
    let mut group = ScenarioGroup::new("pet", suite.client()?);

    group
        .run(Scenario::contract("add_new_pet", "POST /pet adds a new pet"), |client| async move {
            client
                .request()
                .json(&Pet::new(IGOR, "Igor", PetStatus::Available))
                .post("/pet")
                .await?
                .expect_status(200)?
                .expect_field_eq("name", "Igor")?;
            Ok(())
        })
        .await;

    group
        .run(
            Scenario::contract("get_existing_pet", "GET /pet/{petId} returns a stored pet"),
            |client| async move {
                client
                    .request()
                    .json(&Pet::new(BARBOS, "Barbos", PetStatus::Available))
                    .post("/pet")
                    .await?
                    .expect_status(200)?;
                client
                    .request()
                    .path_param("petId", BARBOS)
                    .get("/pet/{petId}")
                    .await?
                    .expect_status(200)?
                    .expect_field_eq("id", BARBOS)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("get_missing_pet", "GET /pet/{petId} answers 404 for an unknown id"),
            |client| async move {
                client
                    .request()
                    .path_param("petId", MISSING_PET)
                    .get("/pet/{petId}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("update_pet_status", "PUT /pet marks the pet as sold")
                .after("add_new_pet"),
            |client| async move {
                client
                    .request()
                    .json(&Pet::new(IGOR, "Igor", PetStatus::Sold))
                    .put("/pet")
                    .await?
                    .expect_status(200)?
                    .expect_field_eq("status", "sold")?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("upload_pet_image", "POST /pet/{petId}/uploadImage accepts a file")
                .after("add_new_pet"),
            |client| async move {
                client
                    .request()
                    .multipart_file("file", "test.png", b"test.png")
                    .path_param("petId", IGOR)
                    .post("/pet/{petId}/uploadImage")
                    .await?
                    .expect_status(200)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "find_pets_by_status",
                "GET /pet/findByStatus returns only available pets",
            ),
            |client| async move {
                client
                    .request()
                    .query_param("status", PetStatus::Available.as_str())
                    .get("/pet/findByStatus")
                    .await?
                    .expect_status(200)?
                    .expect_every_item_in("status", &[json!("available")])?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("delete_pet", "DELETE /pet/{petId} removes the pet")
                .after("add_new_pet"),
            |client| async move {
                client
                    .request()
                    .path_param("petId", IGOR)
                    .delete("/pet/{petId}")
                    .await?
                    .expect_status(200)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "update_missing_pet_form",
                "POST /pet/{petId} with form fields answers 404 for an unknown id",
            ),
            |client| async move {
                let response = client
                    .request()
                    .form_param("name", "Murzik")
                    .form_param("status", PetStatus::Available.as_str())
                    .path_param("petId", FORM_PET)
                    .post("/pet/{petId}")
                    .await?;
                response.expect_status(404)?;
                let message: ApiMessage = response.decode()?;
                if message.kind.as_deref() != Some("unknown")
                    || message.message.as_deref() != Some("not found")
                {
                    return Err(PetstoreError::Expectation(format!(
                        "expected type unknown and message not found, got {} and {}",
                        message.kind.as_deref().unwrap_or("<none>"),
                        message.message.as_deref().unwrap_or("<none>")
                    )));
                }
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "find_pets_by_two_statuses",
                "GET /pet/findByStatus with two statuses returns only those statuses",
            ),
            |client| async move {
                client
                    .request()
                    .query_param("status", "available,sold")
                    .get("/pet/findByStatus")
                    .await?
                    .expect_status(200)?
                    .expect_every_item_in("status", &[json!("available"), json!("sold")])?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "delete_missing_pet",
                "DELETE /pet/{petId} answers 404 for an unknown id",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("petId", FORM_PET)
                    .delete("/pet/{petId}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    let client = group.client().clone();
    reporter.finish_group(&client, &group.finish(), suite.strict_discrepancies())?;
    Ok(())
}
