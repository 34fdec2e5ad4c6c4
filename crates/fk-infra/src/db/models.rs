use crate::db::schema::t_kv_store;
use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = t_kv_store)]
pub struct KvRow {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = t_kv_store)]
pub struct NewKvRow<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: i64,
}
