//! Response shaping.
//!
//! Pure functions turning flat relational rows into the nested JSON objects
//! returned to clients. Child rows are always grouped under their parent by
//! id, never by position, so a list can't pick up another list's items and
//! no child appears twice.

use crate::models::{DailyList, Group, Item, Recipe, User};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::LazyLock;
use utoipa::ToSchema;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Stored images go out as standard base64, or null when absent.
pub fn encode_image(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|b| STANDARD.encode(b))
}

/// Keeps parents in first-seen order and remembers which children each
/// parent already holds.
struct Grouper<K, P, CK> {
    index: HashMap<K, usize>,
    parents: Vec<P>,
    seen: HashSet<(K, CK)>,
}

impl<K: Eq + Hash + Copy, P, CK: Eq + Hash> Grouper<K, P, CK> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            parents: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn parent(&mut self, key: K, make: impl FnOnce() -> P) -> &mut P {
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.parents.push(make());
            self.parents.len() - 1
        });
        &mut self.parents[idx]
    }

    /// True the first time `child` is offered for `key`.
    fn first_child(&mut self, key: K, child: CK) -> bool {
        self.seen.insert((key, child))
    }

    fn finish(self) -> Vec<P> {
        self.parents
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ItemView {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub item_img: Option<String>,
}

pub fn format_item(items: Vec<Item>) -> Vec<ItemView> {
    items
        .into_iter()
        .map(|item| ItemView {
            item_id: item.item_id,
            item_img: encode_image(item.item_img.as_deref()),
            item_name: item.item_name,
            item_description: item.item_description,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub introduction: Option<String>,
    pub avatar: Option<String>,
}

/// Public view of a user; the password hash never leaves the server.
pub fn format_user_info(user: User) -> UserInfo {
    UserInfo {
        user_id: user.user_id,
        avatar: encode_image(user.avatar.as_deref()),
        username: user.username,
        email: user.email,
        phone_number: user.phone_number,
        introduction: user.introduction,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserAvatar {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    pub username: String,
    pub avatar: Option<String>,
}

pub fn format_user_avatar(user_id: i32, username: String, avatar: Option<Vec<u8>>) -> UserAvatar {
    UserAvatar {
        user_id,
        username,
        avatar: encode_image(avatar.as_deref()),
    }
}

#[derive(Debug, Clone)]
pub struct FridgeRow {
    pub item_id: i32,
    pub expire_date: Option<NaiveDate>,
    pub amount: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub item_img: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct FridgeItemView {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub item_img: Option<String>,
    pub amount: i32,
    pub expire_date: Option<NaiveDate>,
}

pub fn format_fridge_items(rows: Vec<FridgeRow>) -> Vec<FridgeItemView> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.item_id))
        .map(|row| FridgeItemView {
            item_id: row.item_id,
            item_img: encode_image(row.item_img.as_deref()),
            item_name: row.item_name,
            item_description: row.item_description,
            amount: row.amount,
            expire_date: row.expire_date,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RecipeSummaryRow {
    pub recipe_id: i32,
    pub recipe_name: String,
    pub username: String,
    pub recipe_img: Option<Vec<u8>>,
    pub matched_ingredients: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeSummary {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i32,
    pub recipe_name: String,
    pub username: String,
    pub recipe_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_ingredients: Option<i64>,
}

pub fn format_recipes(rows: Vec<RecipeSummaryRow>) -> Vec<RecipeSummary> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.recipe_id))
        .map(|row| RecipeSummary {
            recipe_id: row.recipe_id,
            recipe_img: encode_image(row.recipe_img.as_deref()),
            recipe_name: row.recipe_name,
            username: row.username,
            matched_ingredients: row.matched_ingredients,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct IngredientRow {
    pub item_id: i32,
    pub item_name: String,
    pub item_img: Option<Vec<u8>>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct IngredientView {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub item_name: String,
    pub item_img: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeDetail {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i32,
    pub recipe_name: String,
    pub instructions: String,
    pub recipe_img: Option<String>,
    pub username: String,
    pub ingredients: Vec<IngredientView>,
}

pub fn format_recipe(
    recipe: Recipe,
    username: String,
    ingredients: Vec<IngredientRow>,
) -> RecipeDetail {
    let mut seen = HashSet::new();
    let ingredients = ingredients
        .into_iter()
        .filter(|row| seen.insert(row.item_id))
        .map(|row| IngredientView {
            item_id: row.item_id,
            item_img: encode_image(row.item_img.as_deref()),
            item_name: row.item_name,
            amount: row.amount,
        })
        .collect();

    RecipeDetail {
        recipe_id: recipe.recipe_id,
        recipe_img: encode_image(recipe.recipe_img.as_deref()),
        recipe_name: recipe.recipe_name,
        instructions: recipe.instructions,
        username,
        ingredients,
    }
}

#[derive(Debug, Clone)]
pub struct MonthPlanRow {
    pub list_id: i32,
    pub date_to_buy: NaiveDate,
    pub item_id: i32,
    pub item_name: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PlanItem {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub item_name: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MonthPlan {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub date_to_buy: NaiveDate,
    pub items: Vec<PlanItem>,
}

/// Groups one row per (list, item) into one plan per list.
pub fn format_month_plans(rows: Vec<MonthPlanRow>) -> Vec<MonthPlan> {
    let mut grouper = Grouper::new();
    for row in rows {
        if !grouper.first_child(row.list_id, row.item_id) {
            continue;
        }
        let plan = grouper.parent(row.list_id, || MonthPlan {
            list_id: row.list_id,
            date_to_buy: row.date_to_buy,
            items: Vec::new(),
        });
        plan.items.push(PlanItem {
            item_id: row.item_id,
            item_name: row.item_name,
            amount: row.amount,
        });
    }
    grouper.finish()
}

#[derive(Debug, Clone)]
pub struct ListItemRow {
    pub list_id: i32,
    pub item_id: i32,
    pub item_name: String,
    pub item_img: Option<Vec<u8>>,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ListItemView {
    #[serde(rename = "ItemID")]
    pub item_id: i32,
    pub item_name: String,
    pub item_img: Option<String>,
    pub amount: i32,
}

/// Items belonging to `list_id`, first occurrence of each item only.
fn list_items_for(list_id: i32, rows: Vec<ListItemRow>) -> Vec<ListItemView> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| row.list_id == list_id && seen.insert(row.item_id))
        .map(|row| ListItemView {
            item_id: row.item_id,
            item_img: encode_image(row.item_img.as_deref()),
            item_name: row.item_name,
            amount: row.amount,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct DailyListView {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub cost: f64,
    pub date_to_buy: NaiveDate,
    pub items: Vec<ListItemView>,
}

pub fn format_daily_list(list: DailyList, items: Vec<ListItemRow>) -> DailyListView {
    DailyListView {
        list_id: list.list_id,
        cost: list.cost,
        date_to_buy: list.date_to_buy,
        items: list_items_for(list.list_id, items),
    }
}

#[derive(Debug, Clone)]
pub struct BuyerRow {
    pub buyer_id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BuyerView {
    #[serde(rename = "BuyerID")]
    pub buyer_id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GroupListView {
    #[serde(rename = "GroupID")]
    pub group_id: i32,
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub cost: f64,
    pub date_to_buy: NaiveDate,
    pub items: Vec<ListItemView>,
    pub buyers: Vec<BuyerView>,
}

pub fn format_group_list(
    group_id: i32,
    list: DailyList,
    items: Vec<ListItemRow>,
    buyers: Vec<BuyerRow>,
) -> GroupListView {
    let mut seen = HashSet::new();
    let buyers = buyers
        .into_iter()
        .filter(|b| seen.insert(b.buyer_id))
        .map(|b| BuyerView {
            buyer_id: b.buyer_id,
            username: b.username,
        })
        .collect();

    GroupListView {
        group_id,
        list_id: list.list_id,
        cost: list.cost,
        date_to_buy: list.date_to_buy,
        items: list_items_for(list.list_id, items),
        buyers,
    }
}

#[derive(Debug, Clone)]
pub struct MemberRow {
    pub member_id: i32,
    pub username: String,
    pub avatar: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MemberView {
    #[serde(rename = "MemberID")]
    pub member_id: i32,
    pub username: String,
    pub member_avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GroupDetails {
    #[serde(rename = "GroupID")]
    pub group_id: i32,
    #[serde(rename = "AdminID")]
    pub admin_id: i32,
    pub group_name: String,
    pub group_img: Option<String>,
    pub members: Vec<MemberView>,
}

pub fn format_group_details(group: Group, members: Vec<MemberRow>) -> GroupDetails {
    let mut seen = HashSet::new();
    let members = members
        .into_iter()
        .filter(|m| seen.insert(m.member_id))
        .map(|m| MemberView {
            member_id: m.member_id,
            member_avatar: encode_image(m.avatar.as_deref()),
            username: m.username,
        })
        .collect();

    GroupDetails {
        group_id: group.group_id,
        admin_id: group.admin_id,
        group_img: encode_image(group.group_img.as_deref()),
        group_name: group.group_name,
        members,
    }
}

#[derive(Debug, Clone)]
pub struct GroupPlanRow {
    pub list_id: i32,
    pub date_to_buy: NaiveDate,
    pub buyer_id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GroupPlan {
    #[serde(rename = "ListID")]
    pub list_id: i32,
    pub date_to_buy: NaiveDate,
    pub buyers: Vec<BuyerView>,
}

/// Groups one row per (list, buyer) into one plan per list.
pub fn format_group_plans(rows: Vec<GroupPlanRow>) -> Vec<GroupPlan> {
    let mut grouper = Grouper::new();
    for row in rows {
        if !grouper.first_child(row.list_id, row.buyer_id) {
            continue;
        }
        let plan = grouper.parent(row.list_id, || GroupPlan {
            list_id: row.list_id,
            date_to_buy: row.date_to_buy,
            buyers: Vec::new(),
        });
        plan.buyers.push(BuyerView {
            buyer_id: row.buyer_id,
            username: row.username,
        });
    }
    grouper.finish()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GroupSummary {
    #[serde(rename = "GroupID")]
    pub group_id: i32,
    pub group_name: String,
    #[serde(rename = "AdminID")]
    pub admin_id: i32,
    pub group_img: Option<String>,
    /// Username of the group's admin.
    pub username: String,
}

pub fn format_group_summary(group: Group, admin_username: String) -> GroupSummary {
    GroupSummary {
        group_id: group.group_id,
        admin_id: group.admin_id,
        group_img: encode_image(group.group_img.as_deref()),
        group_name: group.group_name,
        username: admin_username,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    fn month_row(list_id: i32, item_id: i32, amount: i32) -> MonthPlanRow {
        MonthPlanRow {
            list_id,
            date_to_buy: date(list_id as u32),
            item_id,
            item_name: format!("item-{item_id}"),
            amount,
        }
    }

    fn plan_row(list_id: i32, buyer_id: i32, username: &str) -> GroupPlanRow {
        GroupPlanRow {
            list_id,
            date_to_buy: date(list_id as u32),
            buyer_id,
            username: username.into(),
        }
    }

    fn list_item(list_id: i32, item_id: i32, name: &str, amount: i32) -> ListItemRow {
        ListItemRow {
            list_id,
            item_id,
            item_name: name.into(),
            item_img: None,
            amount,
        }
    }

    fn daily_list(list_id: i32, cost: f64) -> DailyList {
        DailyList {
            list_id,
            user_id: 1,
            date_to_buy: date(list_id as u32),
            cost,
        }
    }

    fn buyer(buyer_id: i32, username: &str) -> BuyerRow {
        BuyerRow {
            buyer_id,
            username: username.into(),
        }
    }

    fn ingredient(item_id: i32, name: &str, amount: Option<&str>) -> IngredientRow {
        IngredientRow {
            item_id,
            item_name: name.into(),
            item_img: None,
            amount: amount.map(str::to_string),
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("anna@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.uk"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("foo bar@baz.com"));
        assert!(!is_valid_email("@baz.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone_number("0912345678"));
        assert!(is_valid_phone_number("+84912345678"));
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("09123-45678"));
        assert!(!is_valid_phone_number("phone"));
    }

    #[test]
    fn images_are_base64_or_null() {
        assert_eq!(encode_image(Some(&[0xde, 0xad, 0xbe, 0xef])), Some("3q2+7w==".to_string()));
        assert_eq!(encode_image(None), None);
    }

    #[test]
    fn month_plans_group_items_under_their_list() {
        let rows = vec![
            month_row(1, 10, 2),
            month_row(2, 10, 5),
            month_row(1, 11, 1),
            month_row(2, 12, 3),
        ];

        let plans = format_month_plans(rows);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].list_id, 1);
        assert_eq!(plans[0].date_to_buy, date(1));
        let lines = |i: usize| -> Vec<(i32, i32)> {
            plans[i].items.iter().map(|l| (l.item_id, l.amount)).collect()
        };
        assert_eq!(lines(0), vec![(10, 2), (11, 1)]);
        assert_eq!(lines(1), vec![(10, 5), (12, 3)]);
    }

    #[test]
    fn month_plans_drop_duplicate_rows() {
        let rows = vec![month_row(1, 10, 2), month_row(1, 10, 2), month_row(1, 11, 4)];
        let plans = format_month_plans(rows);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].items.len(), 2);
    }

    #[test]
    fn names_with_commas_survive_grouping() {
        let mut row = month_row(1, 10, 1);
        row.item_name = "salt, coarse".to_string();
        let plans = format_month_plans(vec![row]);
        assert_eq!(plans[0].items[0].item_name, "salt, coarse");
    }

    #[test]
    fn group_plans_collect_buyers_per_list() {
        let rows = vec![
            plan_row(3, 1, "an"),
            plan_row(4, 2, "binh"),
            plan_row(3, 2, "binh"),
            plan_row(3, 1, "an"),
        ];

        let plans = format_group_plans(rows);

        assert_eq!(plans.len(), 2);
        let buyers_of_3: Vec<i32> = plans[0].buyers.iter().map(|b| b.buyer_id).collect();
        assert_eq!(buyers_of_3, vec![1, 2]);
        let buyers_of_4: Vec<i32> = plans[1].buyers.iter().map(|b| b.buyer_id).collect();
        assert_eq!(buyers_of_4, vec![2]);
    }

    #[test]
    fn daily_list_ignores_rows_from_other_lists() {
        let list = daily_list(7, 12.5);
        let items = vec![
            list_item(7, 1, "milk", 2),
            list_item(8, 2, "eggs", 12),
            list_item(7, 1, "milk", 2),
        ];

        let view = format_daily_list(list, items);

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].item_name, "milk");
        assert_eq!(view.cost, 12.5);
    }

    #[test]
    fn group_list_dedupes_items_and_buyers() {
        let list = daily_list(5, 3.0);
        let rice = ListItemRow {
            item_img: Some(vec![1, 2]),
            ..list_item(5, 1, "rice", 1)
        };
        let items = vec![rice.clone(), rice];
        let buyers = vec![buyer(9, "chi"), buyer(9, "chi"), buyer(4, "dung")];

        let view = format_group_list(2, list, items, buyers);

        assert_eq!(view.group_id, 2);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].item_img.as_deref(), Some("AQI="));
        let buyer_ids: Vec<i32> = view.buyers.iter().map(|b| b.buyer_id).collect();
        assert_eq!(buyer_ids, vec![9, 4]);
    }

    #[test]
    fn group_details_pair_members_with_their_own_avatar() {
        let group = Group {
            group_id: 1,
            group_name: "home".into(),
            admin_id: 2,
            group_img: None,
        };
        let members = vec![
            MemberRow {
                member_id: 2,
                username: "admin".into(),
                avatar: None,
            },
            MemberRow {
                member_id: 3,
                username: "kid".into(),
                avatar: Some(vec![0xff]),
            },
        ];

        let details = format_group_details(group, members);

        assert_eq!(details.group_img, None);
        assert_eq!(details.members[0].member_avatar, None);
        assert_eq!(details.members[1].member_id, 3);
        assert_eq!(details.members[1].member_avatar.as_deref(), Some("/w=="));
    }

    #[test]
    fn recipe_ingredients_are_unique_by_item() {
        let recipe = Recipe {
            recipe_id: 1,
            user_id: 1,
            recipe_name: "pho".into(),
            instructions: "simmer".into(),
            recipe_img: None,
        };
        let ingredients = vec![
            ingredient(1, "beef", Some("200g")),
            ingredient(2, "noodles", None),
            ingredient(1, "beef", Some("200g")),
        ];

        let detail = format_recipe(recipe, "an".into(), ingredients);

        assert_eq!(detail.username, "an");
        assert_eq!(detail.ingredients.len(), 2);
    }

    #[test]
    fn user_info_serializes_with_client_field_names() {
        let user = User {
            user_id: 3,
            username: "an".into(),
            password_hash: "$argon2id$...".into(),
            email: "an@example.com".into(),
            phone_number: "0912345678".into(),
            avatar: None,
            introduction: Some("hi".into()),
        };

        let json = serde_json::to_value(format_user_info(user)).unwrap();

        assert_eq!(json["UserID"], 3);
        assert_eq!(json["PhoneNumber"], "0912345678");
        assert!(json["Avatar"].is_null());
        assert!(json.get("Password").is_none());
        assert!(json.get("PasswordHash").is_none());
    }

    #[test]
    fn recipe_summary_omits_match_count_unless_searched_by_ingredient() {
        let rows = vec![RecipeSummaryRow {
            recipe_id: 1,
            recipe_name: "bun".into(),
            username: "an".into(),
            recipe_img: None,
            matched_ingredients: None,
        }];
        let json = serde_json::to_value(format_recipes(rows)).unwrap();
        assert_eq!(json[0]["RecipeID"], 1);
        assert!(json[0].get("MatchedIngredients").is_none());
    }
}
