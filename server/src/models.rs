use chrono::NaiveDate;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone_number: String,
    pub avatar: Option<Vec<u8>>,
    pub introduction: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::item)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    pub item_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub item_img: Option<Vec<u8>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::item)]
pub struct NewItem<'a> {
    pub item_name: &'a str,
    pub item_description: Option<&'a str>,
    pub item_img: Option<&'a [u8]>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::fridge)]
pub struct NewFridgeEntry {
    pub user_id: i32,
    pub item_id: i32,
    pub expire_date: Option<NaiveDate>,
    pub amount: i32,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::dailylist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyList {
    pub list_id: i32,
    pub user_id: i32,
    pub date_to_buy: NaiveDate,
    pub cost: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dailylist)]
pub struct NewDailyList {
    pub user_id: i32,
    pub date_to_buy: NaiveDate,
    pub cost: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::listitem)]
pub struct NewListItem {
    pub list_id: i32,
    pub item_id: i32,
    pub amount: i32,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipe)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Recipe {
    pub recipe_id: i32,
    pub user_id: i32,
    pub recipe_name: String,
    pub instructions: String,
    pub recipe_img: Option<Vec<u8>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe)]
pub struct NewRecipe<'a> {
    pub user_id: i32,
    pub recipe_name: &'a str,
    pub instructions: &'a str,
    pub recipe_img: Option<&'a [u8]>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipeingredients)]
pub struct NewRecipeIngredient<'a> {
    pub recipe_id: i32,
    pub item_id: i32,
    pub amount: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::dishplan)]
pub struct NewDishPlan {
    pub user_id: i32,
    pub recipe_id: i32,
    pub date_to_do: NaiveDate,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Group {
    pub group_id: i32,
    pub group_name: String,
    pub admin_id: i32,
    pub group_img: Option<Vec<u8>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::groups)]
pub struct NewGroup<'a> {
    pub group_name: &'a str,
    pub admin_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::groupmember)]
pub struct NewGroupMember {
    pub group_id: i32,
    pub member_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::grouplist)]
pub struct NewGroupBuyer {
    pub group_id: i32,
    pub list_id: i32,
    pub buyer_id: i32,
}

/// `None` fields are left untouched by the update.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserInfoChanges<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub introduction: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipe)]
pub struct RecipeChanges<'a> {
    pub recipe_name: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub recipe_img: Option<&'a [u8]>,
}
