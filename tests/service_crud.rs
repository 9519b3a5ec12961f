//! End-to-end service flows against a scripted executor.

mod common;

use common::{Country, Order, ScriptedExecutor};
use entity_service::{
    insert_or_update, BaseService, Chain, Cnd, Dao, DaoError, FieldFilter, Pager, Record,
};
use sea_query::Value;

/// Application service built on the default methods
struct OrderService {
    dao: Dao<ScriptedExecutor>,
}

impl BaseService<Order> for OrderService {
    type Executor = ScriptedExecutor;

    fn dao(&self) -> &Dao<ScriptedExecutor> {
        &self.dao
    }
}

impl OrderService {
    fn open_orders_of(&self, customer: &str) -> Result<Vec<Order>, DaoError> {
        self.query_by(
            &Cnd::where_("customer", "=", customer)
                .and("status", "=", "open")
                .desc("id"),
        )
    }
}

fn service() -> (OrderService, ScriptedExecutor) {
    let executor = ScriptedExecutor::new();
    (
        OrderService {
            dao: Dao::new(executor.clone()),
        },
        executor,
    )
}

#[test]
fn insert_then_fetch_round_trip() {
    let (orders, executor) = service();
    executor.respond(vec![Record::new().with("id", 100i64)]);
    executor.respond(vec![Order::row(100, "acme", 250)]);

    let created = orders
        .insert(Order {
            customer: "acme".into(),
            total: 250,
            ..Order::default()
        })
        .unwrap();
    assert_eq!(created.id, 100);

    let fetched = orders.fetch_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched.customer, "acme");
    assert_eq!(fetched.total, 250);

    let sql = executor.sql();
    assert_eq!(
        sql[0],
        r#"INSERT INTO "orders" ("customer", "total", "status") VALUES ($1, $2, $3) RETURNING "id""#
    );
    assert_eq!(executor.params(0)[2], Value::String(None));
    assert!(sql[1].starts_with(r#"SELECT "id", "customer", "total", "status" FROM "orders" WHERE "id" = $1"#));
}

#[test]
fn custom_query_method_uses_conditions() {
    let (orders, executor) = service();
    executor.respond(vec![Order::row(2, "acme", 10), Order::row(1, "acme", 5)]);

    let list = orders.open_orders_of("acme").unwrap();
    assert_eq!(list.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(
        executor.sql()[0],
        r#"SELECT "id", "customer", "total", "status" FROM "orders" WHERE "customer" = $1 AND "status" = $2 ORDER BY "id" DESC"#
    );
}

#[test]
fn paged_query_with_links() {
    let (orders, executor) = service();
    executor.respond(vec![Order::row(1, "acme", 10)]);
    executor.respond(vec![
        Record::new().with("order_id", 1i64).with("sku", "A-1").with("quantity", 2i32),
        Record::new().with("order_id", 1i64).with("sku", "B-7").with("quantity", 1i32),
    ]);
    executor.respond(vec![Record::new().with("count", 41i64)]);

    let result = orders
        .query_pager_with_links(&Pager::new(5, 10), "items", &Cnd::new().asc("id"))
        .unwrap();
    assert_eq!(result.list[0].items.len(), 2);
    assert_eq!(result.list[0].items[1].sku, "B-7");

    let pager = result.pager.unwrap();
    assert_eq!(pager.record_count(), 41);
    assert_eq!(pager.page_count(), 5);
    assert!(pager.is_last());

    let sql = executor.sql();
    assert_eq!(sql.len(), 3);
    assert!(sql[1].starts_with(r#"SELECT * FROM "order_items" WHERE "order_id" = $1"#));
    assert_eq!(sql[2], r#"SELECT COUNT(*) AS "count" FROM "orders""#);
}

#[test]
fn query_full_restricts_fields() {
    let (orders, executor) = service();
    executor.respond(vec![Record::new().with("id", 3i64).with("total", 9i64)]);

    let list = orders
        .query_full(&Cnd::new(), "", "^(id|total)$", None)
        .unwrap();
    assert_eq!(list[0].total, 9);
    assert_eq!(list[0].customer, "");
    assert_eq!(executor.sql()[0], r#"SELECT "id", "total" FROM "orders""#);
}

#[test]
fn update_variants() {
    let (orders, executor) = service();
    let order = Order {
        id: 8,
        customer: "acme".into(),
        total: 70,
        status: None,
        items: Vec::new(),
    };

    orders.update(&order).unwrap();
    orders.update_ignore_null(&order).unwrap();
    orders
        .update_by_chain(
            &Chain::make("status", "closed"),
            &Cnd::where_in("id", [1i64, 2, 3]),
        )
        .unwrap();

    let sql = executor.sql();
    assert_eq!(
        sql[0],
        r#"UPDATE "orders" SET "customer" = $1, "total" = $2, "status" = $3 WHERE "id" = $4"#
    );
    assert_eq!(
        sql[1],
        r#"UPDATE "orders" SET "customer" = $1, "total" = $2 WHERE "id" = $3"#
    );
    assert_eq!(
        sql[2],
        r#"UPDATE "orders" SET "status" = $1 WHERE "id" IN ($2, $3, $4)"#
    );
}

#[test]
fn deletes() {
    let (orders, executor) = service();
    orders.delete_by_id(4).unwrap();
    orders.delete_ids(&[]).unwrap();
    orders.clear_by(&Cnd::where_("status", "=", "void")).unwrap();
    orders.clear_table_by("order_items", &Cnd::where_("order_id", "=", 4i64)).unwrap();

    assert_eq!(
        executor.sql(),
        vec![
            r#"DELETE FROM "orders" WHERE "id" = $1"#.to_string(),
            r#"DELETE FROM "orders" WHERE "status" = $1"#.to_string(),
            r#"DELETE FROM "order_items" WHERE "order_id" = $1"#.to_string(),
        ]
    );
}

#[test]
fn insert_or_update_with_filters_insert_branch() {
    let (orders, executor) = service();
    executor.respond(vec![Record::new().with("id", 12i64)]);

    let insert_filter = FieldFilter::create("orders", "^(customer|total)$").unwrap();
    let order = orders
        .insert_or_update_with(
            Order {
                customer: "acme".into(),
                total: 3,
                ..Order::default()
            },
            Some(insert_filter),
            None,
        )
        .unwrap();
    assert_eq!(order.id, 12);
    // id 0 has no complete key, so no existence check runs
    assert_eq!(
        executor.sql(),
        vec![r#"INSERT INTO "orders" ("customer", "total") VALUES ($1, $2) RETURNING "id""#.to_string()]
    );
}

#[test]
fn static_insert_or_update_on_name_key() {
    let executor = ScriptedExecutor::new();
    let dao = Dao::new(executor.clone());

    insert_or_update(
        &dao,
        Country {
            iso: String::new(),
            name: "Nowhere".into(),
        },
    )
    .unwrap();
    insert_or_update(
        &dao,
        Country {
            iso: "NZ".into(),
            name: "New Zealand".into(),
        },
    )
    .unwrap();

    // name keys never decide on insert, even when empty
    let sql = executor.sql();
    assert_eq!(sql.len(), 2);
    assert_eq!(sql[0], r#"UPDATE "countries" SET "name" = $1 WHERE "iso" = $2"#);
    assert_eq!(sql[1], sql[0]);
}

#[test]
fn aggregates() {
    let (orders, executor) = service();
    executor.respond(vec![Record::new().with("value", 1200i64)]);
    executor.respond(vec![Record::new().with("value", 77i64)]);

    assert_eq!(
        orders
            .func_by("SUM", "total", &Cnd::where_("customer", "=", "acme"))
            .unwrap(),
        1200
    );
    assert_eq!(orders.get_max_id().unwrap(), 77);
    assert!(orders.func("SUM", "total; --").is_err());
    assert_eq!(executor.sql().len(), 2);
}
