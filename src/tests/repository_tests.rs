use crate::db::{properties, records, sales};
use crate::db::filter::{Direction, FilterSpec};
use crate::domain::{Identity, Property, SaleHistory};
use crate::errors::CatalogError;
use crate::tests::utils::{date, init_test_db, insert_property, insert_sale};

#[test]
fn insert_returns_freshly_generated_ids() {
    let db = init_test_db();

    let first = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    let second = insert_property(&db, "88 Mesa Dr", "Carlsbad", "92008", "CA");
    assert_ne!(first, second);

    let stored = properties::get_property(&db, first)
        .unwrap()
        .expect("property exists");
    assert_eq!(stored.id, Identity::Existing(first));
    assert_eq!(stored.address, "12 Harbor Way");
    assert_eq!(stored.city, "Oceanside");
    assert!(stored.sale_history.is_empty());
}

#[test]
fn save_with_existing_identity_updates_that_row_only() {
    let db = init_test_db();
    let id = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    let other = insert_property(&db, "88 Mesa Dr", "Carlsbad", "92008", "CA");

    let mut updated = Property::new("12 Harbor Way", "Vista", "92083", "CA");
    updated.id = Identity::Existing(id);
    let returned = properties::save_property(&db, &updated).unwrap();
    assert_eq!(returned, id);

    // No new row appeared, the target changed, the other row did not.
    assert_eq!(records::record_count(&db, "property", None).unwrap(), 2);
    let stored = properties::get_property(&db, id).unwrap().unwrap();
    assert_eq!(stored.city, "Vista");
    let untouched = properties::get_property(&db, other).unwrap().unwrap();
    assert_eq!(untouched.city, "Carlsbad");
}

#[test]
fn add_sale_routes_on_identity_like_save_property() {
    let db = init_test_db();
    let property_id = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");

    let sale_id = insert_sale(&db, property_id, 450_000.0, date(2021, 3, 15));

    let mut corrected = SaleHistory::new(property_id, 455_000.0, date(2021, 3, 15));
    corrected.id = Identity::Existing(sale_id);
    let returned = sales::add_sale(&db, &corrected).unwrap();
    assert_eq!(returned, sale_id);

    let stored = properties::get_property(&db, property_id).unwrap().unwrap();
    assert_eq!(stored.sale_history.len(), 1);
    assert_eq!(stored.sale_history[0].id, Identity::Existing(sale_id));
    assert_eq!(stored.sale_history[0].sale_price, 455_000.0);
}

#[test]
fn invalid_property_never_reaches_the_store() {
    let db = init_test_db();
    let prop = Property::new("", "Oceanside", "92054", "CA");

    let err = properties::save_property(&db, &prop).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation {
            entity: "property",
            field: "address"
        }
    ));
    assert_eq!(records::record_count(&db, "property", None).unwrap(), 0);
}

#[test]
fn listing_attaches_only_the_latest_sale_with_its_price() {
    let db = init_test_db();
    let property_id = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    insert_sale(&db, property_id, 300_000.0, date(2015, 6, 1));
    insert_sale(&db, property_id, 410_000.0, date(2019, 2, 20));
    insert_sale(&db, property_id, 450_000.0, date(2021, 3, 15));

    let listed = properties::get_properties(&db, None).unwrap();
    assert_eq!(listed.len(), 1);
    let history = &listed[0].sale_history;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sale_date, date(2021, 3, 15));
    // The price must be the one paired with the latest date, not any other.
    assert_eq!(history[0].sale_price, 450_000.0);
    assert_eq!(history[0].property_id, property_id);
}

#[test]
fn get_property_attaches_the_full_history_oldest_first() {
    let db = init_test_db();
    let property_id = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    // Inserted out of order on purpose.
    insert_sale(&db, property_id, 450_000.0, date(2021, 3, 15));
    insert_sale(&db, property_id, 300_000.0, date(2015, 6, 1));
    insert_sale(&db, property_id, 410_000.0, date(2019, 2, 20));

    let stored = properties::get_property(&db, property_id).unwrap().unwrap();
    let dates: Vec<_> = stored.sale_history.iter().map(|s| s.sale_date).collect();
    assert_eq!(
        dates,
        vec![date(2015, 6, 1), date(2019, 2, 20), date(2021, 3, 15)]
    );
}

#[test]
fn unsold_properties_still_appear_in_listings() {
    let db = init_test_db();
    let sold = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    let unsold = insert_property(&db, "88 Mesa Dr", "Carlsbad", "92008", "CA");
    insert_sale(&db, sold, 450_000.0, date(2021, 3, 15));

    let listed = properties::get_properties(&db, None).unwrap();
    assert_eq!(listed.len(), 2);
    let unsold_entry = listed
        .iter()
        .find(|p| p.id == Identity::Existing(unsold))
        .expect("unsold property listed");
    assert!(unsold_entry.sale_history.is_empty());
}

#[test]
fn filters_restrict_order_and_window_listings() {
    let db = init_test_db();
    insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    insert_property(&db, "34 Pier View", "Oceanside", "92057", "CA");
    insert_property(&db, "56 Coast Hwy", "Oceanside", "92056", "CA");
    insert_property(&db, "88 Mesa Dr", "Carlsbad", "92008", "CA");

    let spec = FilterSpec::new()
        .where_eq("city", "Oceanside")
        .order_by(["zip"], Direction::Desc)
        .limit(0, 2);
    let listed = properties::get_properties(&db, Some(&spec)).unwrap();

    let zips: Vec<_> = listed.iter().map(|p| p.zip.as_str()).collect();
    assert_eq!(zips, vec!["92057", "92056"]);
}

#[test]
fn count_matches_an_unlimited_query_with_the_same_filter() {
    let db = init_test_db();
    insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    insert_property(&db, "34 Pier View", "Oceanside", "92057", "CA");
    insert_property(&db, "56 Coast Hwy", "Oceanside", "92056", "CA");
    insert_property(&db, "88 Mesa Dr", "Carlsbad", "92008", "CA");

    let spec = FilterSpec::new().where_eq("city", "Oceanside");
    let count = records::record_count(&db, "property", Some(&spec)).unwrap();
    let listed = properties::get_properties(&db, Some(&spec)).unwrap();
    assert_eq!(count, listed.len() as i64);
    assert_eq!(count, 3);
}

#[test]
fn delete_removes_the_property_row_but_not_its_sales() {
    let db = init_test_db();
    let property_id = insert_property(&db, "12 Harbor Way", "Oceanside", "92054", "CA");
    insert_sale(&db, property_id, 450_000.0, date(2021, 3, 15));

    assert!(properties::delete_property(&db, property_id).unwrap());
    assert!(!properties::delete_property(&db, property_id).unwrap());
    assert!(properties::get_property(&db, property_id).unwrap().is_none());

    // Sale rows are intentionally left behind at this layer.
    let sales_left: i64 = db
        .with_conn(|conn| {
            conn.query_row("SELECT count(*) FROM sale_history", [], |row| row.get(0))
                .map_err(Into::into)
        })
        .unwrap();
    assert_eq!(sales_left, 1);
}

#[test]
fn get_property_on_a_missing_id_is_none() {
    let db = init_test_db();
    assert!(properties::get_property(&db, 9999).unwrap().is_none());
}
