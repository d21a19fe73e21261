use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use portal::{
    model::{
        api::PageParams,
        device::{DeviceFilterParams, UpdateCloneDto, UpsertDeviceDto},
        status::{CloneHealth, CloneStatus, DeviceStatus},
    },
    server::{
        controller::{
            device::{get_device, get_devices, update_clone, upsert_device},
            util::extract::{ApiJson, ApiQuery},
        },
        model::app::AppState,
    },
};
use portal_test_utils::prelude::*;

use super::{body_json, login_as};

mod get_devices {
    use super::*;

    #[tokio::test]
    /// Expect clone and occupied clone counts per device
    async fn lists_devices_with_clone_counts() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 3)
            .await?;
        test.account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 5, "Assigned")
            .await?;
        login_as(&test, user.id).await;

        let result = get_devices(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiQuery(PageParams::default()),
            ApiQuery(DeviceFilterParams::default()),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["clone_count"], 4);
        assert_eq!(body["items"][0]["occupied_clones"], 1);

        Ok(())
    }

    #[tokio::test]
    /// Expect only devices with the requested status
    async fn filters_by_status() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.device().insert_device("dev1", "Available").await?;
        test.device().insert_device("dev2", "Broken").await?;
        login_as(&test, user.id).await;

        let result = get_devices(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            ApiQuery(PageParams::default()),
            ApiQuery(DeviceFilterParams {
                status: Some(DeviceStatus::Broken),
            }),
        )
        .await;

        assert!(result.is_ok());
        let body = body_json(result.unwrap().into_response()).await;
        assert_eq!(body["total_items"], 1);
        assert_eq!(body["items"][0]["id"], "dev2");

        Ok(())
    }
}

mod get_device {
    use super::*;

    #[tokio::test]
    /// Expect the device with its clone slots ordered by clone number
    async fn returns_device_with_clones() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        test.device()
            .insert_device_with_clones(TEST_DEVICE_ID, 2)
            .await?;
        login_as(&test, user.id).await;

        let result = get_device(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path(TEST_DEVICE_ID.to_string()),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let clones = body["clones"].as_array().unwrap();
        assert_eq!(clones.len(), 2);
        assert_eq!(clones[0]["clone_number"], 0);
        assert_eq!(clones[1]["clone_number"], 1);

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 for a device that does not exist
    async fn not_found_for_unknown_device() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        login_as(&test, user.id).await;

        let result = get_device(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path("missing".to_string()),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod upsert_device {
    use super::*;

    #[tokio::test]
    /// Expect a new device with empty available clone slots
    async fn creates_device_with_clones() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        login_as(&test, admin.id).await;

        let result = upsert_device(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path(TEST_DEVICE_ID.to_string()),
            ApiJson(UpsertDeviceDto {
                status: DeviceStatus::Available,
                clone_count: 3,
            }),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        for clone_number in 0..3 {
            let clone = test.clone_at(TEST_DEVICE_ID, clone_number).await?;
            assert_eq!(clone.status, "Available");
            assert!(clone.assigned_username.is_none());
        }

        Ok(())
    }

    #[tokio::test]
    /// Expect existing occupied clones to be left untouched
    async fn keeps_existing_clones() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        test.account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 0, "Logged In")
            .await?;
        login_as(&test, admin.id).await;

        let result = upsert_device(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path(TEST_DEVICE_ID.to_string()),
            ApiJson(UpsertDeviceDto {
                status: DeviceStatus::Maintenance,
                clone_count: 2,
            }),
        )
        .await;

        assert!(result.is_ok());

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert_eq!(clone.assigned_username.as_deref(), Some("alice"));
        assert_eq!(clone.status, "Logged In");

        let body = body_json(result.unwrap().into_response()).await;
        assert_eq!(body["status"], "Maintenance");
        assert_eq!(body["clones"].as_array().unwrap().len(), 2);

        Ok(())
    }

    #[tokio::test]
    /// Expect 403 for a user without the admin role
    async fn forbidden_for_standard_user() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let user = test.user().insert_standard_user().await?;
        login_as(&test, user.id).await;

        let result = upsert_device(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path(TEST_DEVICE_ID.to_string()),
            ApiJson(UpsertDeviceDto {
                status: DeviceStatus::Available,
                clone_count: 1,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}

mod update_clone {
    use super::*;

    #[tokio::test]
    /// Expect the health of an occupied clone to change without touching the assignment
    async fn updates_health() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        test.account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 0, "Assigned")
            .await?;
        login_as(&test, admin.id).await;

        let result = update_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path((TEST_DEVICE_ID.to_string(), 0)),
            ApiJson(UpdateCloneDto {
                status: None,
                health: Some(CloneHealth::Broken),
            }),
        )
        .await;

        assert!(result.is_ok());

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert_eq!(clone.health, "Broken");
        assert_eq!(clone.assigned_username.as_deref(), Some("alice"));

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 when an occupied clone would be marked available
    async fn rejects_available_status_for_occupied_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        test.account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 0, "Assigned")
            .await?;
        login_as(&test, admin.id).await;

        let result = update_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path((TEST_DEVICE_ID.to_string(), 0)),
            ApiJson(UpdateCloneDto {
                status: Some(CloneStatus::Available),
                health: None,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert_eq!(clone.status, "Assigned");

        Ok(())
    }

    #[tokio::test]
    /// Expect 400 when an empty clone would be put in maintenance
    async fn rejects_maintenance_status_for_empty_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device_with_clones(TEST_DEVICE_ID, 1).await?;
        login_as(&test, admin.id).await;

        let result = update_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path((TEST_DEVICE_ID.to_string(), 0)),
            ApiJson(UpdateCloneDto {
                status: Some(CloneStatus::Maintenance),
                health: None,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert_eq!(clone.status, "Available");
        assert!(clone.assigned_username.is_none());

        Ok(())
    }

    #[tokio::test]
    /// Expect an occupied clone to enter maintenance and keep its account
    async fn puts_occupied_clone_in_maintenance() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        test.account()
            .insert_account_in_clone("alice", TEST_DEVICE_ID, 0, "Assigned")
            .await?;
        login_as(&test, admin.id).await;

        let result = update_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path((TEST_DEVICE_ID.to_string(), 0)),
            ApiJson(UpdateCloneDto {
                status: Some(CloneStatus::Maintenance),
                health: None,
            }),
        )
        .await;

        assert!(result.is_ok());

        let clone = test.clone_at(TEST_DEVICE_ID, 0).await?;
        assert_eq!(clone.status, "Maintenance");
        assert_eq!(clone.assigned_username.as_deref(), Some("alice"));

        Ok(())
    }

    #[tokio::test]
    /// Expect 404 for a clone slot that does not exist
    async fn not_found_for_unknown_clone() -> Result<(), TestError> {
        let test = test_setup_with_portal_tables!()?;
        let admin = test.user().insert_admin().await?;
        test.device().insert_device(TEST_DEVICE_ID, "Available").await?;
        login_as(&test, admin.id).await;

        let result = update_clone(
            State(test.app_state::<AppState>()),
            test.session.clone(),
            Path((TEST_DEVICE_ID.to_string(), 7)),
            ApiJson(UpdateCloneDto {
                status: Some(CloneStatus::Broken),
                health: None,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
