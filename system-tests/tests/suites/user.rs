// system-tests/tests/suites/user.rs
// ============================================================================
// Module: User Group
// Description: Ordered contract scenarios for the /user resource.
// Purpose: Verify user creation, lookup, update, login, and deletion.
// Dependencies: system-tests helpers, petstore-client
// ============================================================================

//! ## Overview
//! User "andrew01" is created first, read back, updated, and deleted last.
//! Reads and the final delete go through the poll helper because the public
//! service may answer 404 for a user created moments earlier.
//!
//! Several scenarios assert the documented 400 where the live service is
//! known to answer differently; they run as known discrepancies.

use petstore_client::PollPolicy;
use petstore_client::Scenario;
use petstore_client::ScenarioGroup;
use petstore_client::User;
use petstore_client::eventually;
use system_tests::artifacts::TestReporter;
use system_tests::bootstrap::bootstrap;

use crate::helpers::logging::init_logging;

const PRIMARY_USER: &str = "andrew01";
const LOGIN_USER: &str = "andrew02";

fn user(
    id: i64,
    username: &str,
    [first_name, last_name]: [&str; 2],
    email: &str,
    password: &str,
    phone: &str,
    user_status: i32,
) -> User {
    User {
        id,
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: phone.to_string(),
        user_status,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn user_group() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let suite = bootstrap()?;
    let mut reporter = TestReporter::new("user", suite)?;
    let mut group = ScenarioGroup::new("user", suite.client()?);
    let read_policy = suite.poll(PollPolicy::from_secs(6, 1));
    let delete_policy = suite.poll(PollPolicy::from_secs(5, 1));

    group
        .run(Scenario::contract("create_user", "POST /user creates a valid user"), |client| {
            async move {
                let andrew = user(
                    1,
                    PRIMARY_USER,
                    ["Andrey", "Andreev"],
                    "andrew@example.ru",
                    "123321",
                    "123-456-7890",
                    1,
                );
                client.request().json(&andrew).post("/user").await?.expect_status(200)?;
                Ok(())
            }
        })
        .await;

    group
        .run(
            Scenario::contract("get_user_by_username", "GET /user/{username} returns the user")
                .after("create_user"),
            |client| async move {
                eventually(read_policy, || {
                    let client = client.clone();
                    async move {
                        client
                            .request()
                            .path_param("username", PRIMARY_USER)
                            .get("/user/{username}")
                            .await?
                            .expect_status(200)?
                            .expect_field_eq("username", PRIMARY_USER)?;
                        Ok(())
                    }
                })
                .await
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "create_user_with_empty_username",
                "POST /user rejects an empty username with 400",
                "accepts the user and answers 200",
            ),
            |client| async move {
                let nameless =
                    user(342, "", ["Igor", "Igorev"], "igor@example.ru", "123321", "123-456-7890", 1);
                client.request().json(&nameless).post("/user").await?.expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "create_users_with_array",
                "POST /user/createWithArray creates every listed user",
            ),
            |client| async move {
                let users = [
                    user(
                        654,
                        "first",
                        ["Andrey", "Andreev"],
                        "andrew@example.ru",
                        "123321",
                        "123-456-7890",
                        1,
                    ),
                    user(
                        872,
                        "second",
                        ["Petr", "Petrov"],
                        "petrov@example.ru",
                        "123321",
                        "777-544-1233",
                        2,
                    ),
                ];
                client
                    .request()
                    .json(&users)
                    .post("/user/createWithArray")
                    .await?
                    .expect_status(200)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("get_missing_user", "GET /user/{username} answers 404 for an unknown user"),
            |client| async move {
                client
                    .request()
                    .path_param("username", "nonexistentuser")
                    .get("/user/{username}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "get_user_with_blank_username",
                "GET /user/{username} rejects a blank username with 400",
                "answers 404",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("username", " ")
                    .get("/user/{username}")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("update_user", "PUT /user/{username} updates an existing user")
                .after("create_user"),
            |client| async move {
                let updated = user(
                    1,
                    PRIMARY_USER,
                    ["Andreyy", "Andreev"],
                    "andrew@example.ru",
                    "123abc",
                    "123-456-7890",
                    1,
                );
                client
                    .request()
                    .json(&updated)
                    .path_param("username", PRIMARY_USER)
                    .put("/user/{username}")
                    .await?
                    .expect_status(200)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "update_missing_user",
                "PUT /user/{username} answers 404 for an unknown user",
                "creates the user and answers 200",
            ),
            |client| async move {
                let stranger = user(
                    1,
                    "nocreated",
                    ["Max", "Ivanov"],
                    "ivanov@example.ru",
                    "98765",
                    "123-456-7890",
                    1,
                );
                client
                    .request()
                    .json(&stranger)
                    .path_param("username", "user")
                    .put("/user/{username}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "update_user_with_malformed_body",
                "PUT /user/{username} rejects malformed JSON with 400",
            ),
            |client| async move {
                client
                    .request()
                    .raw_json(r#"{ "id": 1, "username": asd23, "firstName": "April", "lastName":  }"#)
                    .path_param("username", " ")
                    .put("/user/{username}")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "delete_missing_user",
                "DELETE /user/{username} answers 404 for an unknown user",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("username", "fakeuser")
                    .delete("/user/{username}")
                    .await?
                    .expect_status(404)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "delete_user_with_invalid_username",
                "DELETE /user/{username} rejects an invalid username with 400",
                "answers 404",
            ),
            |client| async move {
                client
                    .request()
                    .path_param("username", "^^%$@#$")
                    .delete("/user/{username}")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("login_user", "GET /user/login returns session headers"),
            |client| async move {
                client
                    .request()
                    .query_param("username", LOGIN_USER)
                    .query_param("password", "123abc")
                    .get("/user/login")
                    .await?
                    .expect_status(200)?
                    .expect_header_present("X-Expires-After")?
                    .expect_header_present("X-Rate-Limit")?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "login_with_blank_password",
                "GET /user/login rejects a blank password with 400",
                "logs the user in and answers 200",
            ),
            |client| async move {
                client
                    .request()
                    .query_param("username", LOGIN_USER)
                    .query_param("password", "   ")
                    .get("/user/login")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(Scenario::contract("logout_user", "GET /user/logout ends the session"), |client| {
            async move {
                client.request().get("/user/logout").await?.expect_status(200)?;
                Ok(())
            }
        })
        .await;

    group
        .run(
            Scenario::known_discrepancy(
                "create_users_with_empty_array",
                "POST /user/createWithArray rejects an empty array with 400",
                "answers 200",
            ),
            |client| async move {
                client
                    .request()
                    .raw_json("[]")
                    .post("/user/createWithArray")
                    .await?
                    .expect_status(400)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract(
                "create_users_with_list",
                "POST /user/createWithList creates every listed user",
            ),
            |client| async move {
                let users = vec![
                    user(
                        10,
                        "list1",
                        ["Pavel", "Pavlov"],
                        "pavlov@example.ru",
                        "pass1",
                        "111-111-1111",
                        1,
                    ),
                    user(
                        11,
                        "list2",
                        ["Semen", "Semenov"],
                        "semenov@example.ru",
                        "pass2",
                        "222-222-2222",
                        2,
                    ),
                ];
                client
                    .request()
                    .json(&users)
                    .post("/user/createWithList")
                    .await?
                    .expect_status(200)?;
                Ok(())
            },
        )
        .await;

    group
        .run(
            Scenario::contract("delete_user", "DELETE /user/{username} removes the user")
                .after("create_user")
                .after("update_user"),
            |client| async move {
                eventually(delete_policy, || {
                    let client = client.clone();
                    async move {
                        client
                            .request()
                            .path_param("username", PRIMARY_USER)
                            .delete("/user/{username}")
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
