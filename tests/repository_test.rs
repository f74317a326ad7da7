// ==========================================
// 仓储层集成测试
// ==========================================
// 测试目标: 位置层级、组隔离、两段式写入
// ==========================================


use household_inventory::domain::{
    AssetId, ItemDetails, ItemDraft, ItemField, LabelCreate, LocationCreate,
};
use household_inventory::repository::{
    ItemStore, LabelStore, LocationStore, RepositoryError,
};
use test_helpers::{create_test_db, TestStores};

const GROUP: &str = "household-1";

fn create_location(stores: &TestStores, name: &str, parent_id: Option<String>) -> String {
    stores
        .locations
        .create(
            GROUP,
            LocationCreate {
                name: name.to_string(),
                description: String::new(),
                parent_id,
            },
        )
        .unwrap()
        .id
}

#[test]
fn test_path_for_walks_to_root() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let stores = TestStores::open(&db_path).unwrap();

    let home = create_location(&stores, "Home", None);
    let garage = create_location(&stores, "Garage", Some(home.clone()));
    let shelf = create_location(&stores, "Shelf", Some(garage));

    let path = stores.locations.path_for(GROUP, &shelf).unwrap();
    let names: Vec<&str> = path.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Home", "Garage", "Shelf"]);

    let root = stores.locations.path_for(GROUP, &home).unwrap();
    assert_eq!(root.len(), 1);
}

#[test]
fn test_path_for_other_group_is_not_found() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let stores = TestStores::open(&db_path).unwrap();
    let home = create_location(&stores, "Home", None);

    let err = stores.locations.path_for("other-group", &home).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_highest_asset_id_empty_group() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let stores = TestStores::open(&db_path).unwrap();

    assert_eq!(
        stores.items.get_highest_asset_id(GROUP).unwrap(),
        AssetId::new(0)
    );
}

#[test]
fn test_draft_then_finalize() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let stores = TestStores::open(&db_path).unwrap();

    let location_id = create_location(&stores, "Office", None);
    let label = stores
        .labels
        .create(
            GROUP,
            LabelCreate {
                name: "Electronics".to_string(),
                description: String::new(),
            },
        )
        .unwrap();

    let item_id = stores
        .items
        .create_draft(
            GROUP,
            ItemDraft {
                import_ref: "abc".to_string(),
                name: "Monitor".to_string(),
                description: "27 inch".to_string(),
                location_id: Some(location_id.clone()),
                label_ids: vec![label.id.clone()],
                asset_id: AssetId::new(12),
            },
        )
        .unwrap();

    assert!(stores.items.check_ref(GROUP, "abc").unwrap());
    assert!(!stores.items.check_ref("other-group", "abc").unwrap());

    let details = ItemDetails {
        quantity: 2,
        serial_number: "SN-1".to_string(),
        fields: vec![ItemField {
            name: "Resolution".to_string(),
            text_value: "4K".to_string(),
        }],
        ..Default::default()
    };
    let item = stores
        .items
        .finalize_details(GROUP, &item_id, details.clone())
        .unwrap();

    assert_eq!(item.name, "Monitor");
    assert_eq!(item.location_id.as_deref(), Some(location_id.as_str()));
    assert_eq!(item.labels, vec![label]);
    assert_eq!(item.asset_id, AssetId::new(12));
    assert_eq!(item.quantity, 2);
    assert_eq!(item.fields.len(), 1);

    // 自定义字段覆盖写
    let replaced = ItemDetails {
        fields: vec![ItemField {
            name: "Panel".to_string(),
            text_value: "IPS".to_string(),
        }],
        ..details
    };
    let item = stores
        .items
        .finalize_details(GROUP, &item_id, replaced)
        .unwrap();
    assert_eq!(item.fields.len(), 1);
    assert_eq!(item.fields[0].name, "Panel");
}

#[test]
fn test_zero_asset_id_and_import_ref_queries() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let stores = TestStores::open(&db_path).unwrap();

    for (name, asset_id, import_ref) in [("A", 0, ""), ("B", 3, "r-b"), ("C", 0, "r-c")] {
        stores
            .items
            .create_draft(
                GROUP,
                ItemDraft {
                    import_ref: import_ref.to_string(),
                    name: name.to_string(),
                    asset_id: AssetId::new(asset_id),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let zero_ids: Vec<String> = stores
        .items
        .get_all_zero_asset_id(GROUP)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(zero_ids, vec!["A", "C"]);

    let missing_refs = stores.items.get_all_zero_import_ref(GROUP).unwrap();
    assert_eq!(missing_refs.len(), 1);

    stores
        .items
        .set_import_ref(GROUP, &missing_refs[0], "r-a")
        .unwrap();
    assert!(stores.items.check_ref(GROUP, "r-a").unwrap());
    assert!(stores.items.get_all_zero_import_ref(GROUP).unwrap().is_empty());
}
