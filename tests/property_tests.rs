//! Property-based tests for input decoding, validation and the hashtag filter.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use geo_catalog_api::{
    db::{establish_connection_with_config, run_migrations, DbConfig},
    dto::{image::decode_image, CreateCoordinateRequest},
    entities::geo_catalog::NewGeoCatalog,
    services::{
        CoordinateService, CreateGeoCatalogInput, GeoCatalogFilter, GeoCatalogService,
        NewCoordinate,
    },
};
use proptest::prelude::*;
use validator::Validate;

fn coordinate_request(latitude: f64, longitude: f64) -> CreateCoordinateRequest {
    CreateCoordinateRequest {
        latitude,
        longitude,
        name: None,
        contact: None,
        city: None,
        region: None,
        country: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn standard_base64_decodes_to_input_bytes(bytes in prop::collection::vec(any::<u8>(), 1..256)) {
        let text = general_purpose::STANDARD.encode(&bytes);
        prop_assert_eq!(decode_image(Some(text.as_str())).unwrap(), Some(bytes));
    }

    #[test]
    fn url_safe_base64_decodes_to_input_bytes(bytes in prop::collection::vec(any::<u8>(), 1..256)) {
        let padded = general_purpose::URL_SAFE.encode(&bytes);
        let unpadded = general_purpose::URL_SAFE_NO_PAD.encode(&bytes);
        prop_assert_eq!(decode_image(Some(padded.as_str())).unwrap(), Some(bytes.clone()));
        prop_assert_eq!(decode_image(Some(unpadded.as_str())).unwrap(), Some(bytes));
    }

    #[test]
    fn in_range_positions_validate(latitude in -90.0f64..=90.0, longitude in -180.0f64..=180.0) {
        prop_assert!(coordinate_request(latitude, longitude).validate().is_ok());
    }

    #[test]
    fn out_of_range_latitude_is_rejected(excess in 0.001f64..1.0e6, negative in any::<bool>()) {
        let latitude = if negative { -90.0 - excess } else { 90.0 + excess };
        prop_assert!(coordinate_request(latitude, 0.0).validate().is_err());
    }
}

fn hashtag_strategy() -> impl Strategy<Value = String> {
    "#[a-cA-C%_]{0,6}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Every returned row contains the needle and no containing row is dropped.
    #[test]
    fn hashtag_filter_is_exact_substring(
        tags in prop::collection::vec(hashtag_strategy(), 1..6),
        needle in "[a-cA-C%_]{1,2}",
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (found, expected) = runtime.block_on(async {
            let pool = establish_connection_with_config(&DbConfig::in_memory()).await.unwrap();
            run_migrations(&pool).await.unwrap();
            let pool = Arc::new(pool);
            let coordinates = CoordinateService::new(pool.clone());
            let geo_catalogs = GeoCatalogService::new(pool);

            coordinates
                .create_coordinate(NewCoordinate { latitude: 0.0, longitude: 0.0, ..Default::default() })
                .await
                .unwrap();
            for (i, tag) in tags.iter().enumerate() {
                geo_catalogs
                    .create_geo_catalog(CreateGeoCatalogInput {
                        entry: NewGeoCatalog {
                            title: format!("entry {}", i),
                            description: String::new(),
                            img_source: None,
                            hashtag: tag.clone(),
                        },
                        latitude: 0.0,
                        longitude: 0.0,
                    })
                    .await
                    .unwrap();
            }

            let found: Vec<String> = geo_catalogs
                .list_geo_catalogs(GeoCatalogFilter { hashtag: Some(needle.clone()), region: None })
                .await
                .unwrap()
                .into_iter()
                .map(|row| row.geo_catalog.hashtag)
                .collect();
            let expected: Vec<String> = tags.iter().filter(|t| t.contains(needle.as_str())).cloned().collect();
            (found, expected)
        });

        prop_assert_eq!(found, expected);
    }
}
