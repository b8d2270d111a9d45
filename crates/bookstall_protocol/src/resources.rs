//! Admin resource definitions.
//!
//! Each admin screen manages one REST resource under `/admin/{path}`. The
//! [`AdminResource`] trait carries everything the generic collection store
//! needs to operate on a resource: the item shape, the create/update draft
//! shape, the URL path segment and a stable item identity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A REST resource managed by the admin console.
///
/// Implementors are zero-sized markers; the item and draft shapes hang off
/// the associated types. `id` must return the server-assigned identity used
/// by update and delete to match items inside the current page.
pub trait AdminResource: Send + Sync + 'static {
    /// Item shape returned by the server.
    type Item: Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Payload accepted by create and update.
    type Draft: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// URL segment under `/admin/`.
    const PATH: &'static str;
    /// Human noun used in notifications ("author created").
    const LABEL: &'static str;

    /// Returns the server-assigned identity of an item.
    fn id(item: &Self::Item) -> u64;
}

/// A book author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Server-assigned identity.
    pub author_id: u64,
    /// Display name.
    pub author_name: String,
}

/// Create/update payload for an author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDraft {
    /// Display name.
    pub author_name: String,
}

/// Marker for the `/admin/authors` resource.
pub struct Authors;

impl AdminResource for Authors {
    type Item = Author;
    type Draft = AuthorDraft;
    const PATH: &'static str = "authors";
    const LABEL: &'static str = "author";

    fn id(item: &Author) -> u64 {
        item.author_id
    }
}

/// A publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    /// Server-assigned identity.
    pub publisher_id: u64,
    /// Display name.
    pub publisher_name: String,
}

/// Create/update payload for a publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherDraft {
    /// Display name.
    pub publisher_name: String,
}

/// Marker for the `/admin/publishers` resource.
pub struct Publishers;

impl AdminResource for Publishers {
    type Item = Publisher;
    type Draft = PublisherDraft;
    const PATH: &'static str = "publishers";
    const LABEL: &'static str = "publisher";

    fn id(item: &Publisher) -> u64 {
        item.publisher_id
    }
}

/// A distributor the shop orders stock from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributor {
    /// Server-assigned identity.
    pub distributor_id: u64,
    /// Display name.
    pub distributor_name: String,
    /// Postal address, if known.
    pub address: Option<String>,
    /// Contact phone number, if known.
    pub phone: Option<String>,
}

/// Create/update payload for a distributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorDraft {
    /// Display name.
    pub distributor_name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Marker for the `/admin/distributors` resource.
pub struct Distributors;

impl AdminResource for Distributors {
    type Item = Distributor;
    type Draft = DistributorDraft;
    const PATH: &'static str = "distributors";
    const LABEL: &'static str = "distributor";

    fn id(item: &Distributor) -> u64 {
        item.distributor_id
    }
}

/// A book category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Server-assigned identity.
    pub category_id: u64,
    /// Display name.
    pub category_name: String,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    /// Display name.
    pub category_name: String,
}

/// Marker for the `/admin/categories` resource.
pub struct Categories;

impl AdminResource for Categories {
    type Item = Category;
    type Draft = CategoryDraft;
    const PATH: &'static str = "categories";
    const LABEL: &'static str = "category";

    fn id(item: &Category) -> u64 {
        item.category_id
    }
}

/// A book binding/format type (hardcover, paperback, audio...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookType {
    /// Server-assigned identity.
    pub book_type_id: u64,
    /// Display name.
    pub book_type_name: String,
}

/// Create/update payload for a book type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTypeDraft {
    /// Display name.
    pub book_type_name: String,
}

/// Marker for the `/admin/book-types` resource.
pub struct BookTypes;

impl AdminResource for BookTypes {
    type Item = BookType;
    type Draft = BookTypeDraft;
    const PATH: &'static str = "book-types";
    const LABEL: &'static str = "book type";

    fn id(item: &BookType) -> u64 {
        item.book_type_id
    }
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned identity.
    pub book_id: u64,
    /// Title.
    pub book_name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub quantity: u32,
    /// Author reference.
    pub author_id: u64,
    /// Publisher reference.
    pub publisher_id: u64,
    /// Category reference.
    pub category_id: u64,
    /// Book type reference.
    pub book_type_id: u64,
    /// Cover image URL, set by the server after upload.
    pub cover_url: Option<String>,
}

/// Create/update payload for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    /// Title.
    pub book_name: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub quantity: u32,
    /// Author reference.
    pub author_id: u64,
    /// Publisher reference.
    pub publisher_id: u64,
    /// Category reference.
    pub category_id: u64,
    /// Book type reference.
    pub book_type_id: u64,
}

/// Marker for the `/admin/books` resource.
pub struct Books;

impl AdminResource for Books {
    type Item = Book;
    type Draft = BookDraft;
    const PATH: &'static str = "books";
    const LABEL: &'static str = "book";

    fn id(item: &Book) -> u64 {
        item.book_id
    }
}

/// A console user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Server-assigned identity.
    pub user_id: u64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role name ("admin", "staff", ...).
    pub role: String,
    /// Whether the account may sign in.
    pub enabled: bool,
}

/// Create/update payload for a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role name.
    pub role: String,
    /// Initial password; absent on update to keep the current one.
    pub password: Option<String>,
    /// Whether the account may sign in.
    pub enabled: bool,
}

/// Marker for the `/admin/users` resource.
pub struct Users;

impl AdminResource for Users {
    type Item = AdminUser;
    type Draft = UserDraft;
    const PATH: &'static str = "users";
    const LABEL: &'static str = "user";

    fn id(item: &AdminUser) -> u64 {
        item.user_id
    }
}

/// A state in the order workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    /// Server-assigned identity.
    pub order_status_id: u64,
    /// Display name.
    pub order_status_name: String,
}

/// Create/update payload for an order status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusDraft {
    /// Display name.
    pub order_status_name: String,
}

/// Marker for the `/admin/order-status` resource.
pub struct OrderStatuses;

impl AdminResource for OrderStatuses {
    type Item = OrderStatus;
    type Draft = OrderStatusDraft;
    const PATH: &'static str = "order-status";
    const LABEL: &'static str = "order status";

    fn id(item: &OrderStatus) -> u64 {
        item.order_status_id
    }
}

/// A state in the refund workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundStatus {
    /// Server-assigned identity.
    pub refund_status_id: u64,
    /// Display name.
    pub refund_status_name: String,
}

/// Create/update payload for a refund status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundStatusDraft {
    /// Display name.
    pub refund_status_name: String,
}

/// Marker for the `/admin/refund-status` resource.
pub struct RefundStatuses;

impl AdminResource for RefundStatuses {
    type Item = RefundStatus;
    type Draft = RefundStatusDraft;
    const PATH: &'static str = "refund-status";
    const LABEL: &'static str = "refund status";

    fn id(item: &RefundStatus) -> u64 {
        item.refund_status_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_round_trips_with_camel_case() {
        let json = r#"{"authorId":1,"authorName":"Tolkien"}"#;
        let author: Author = serde_json::from_str(json).unwrap();
        assert_eq!(Authors::id(&author), 1);
        assert_eq!(author.author_name, "Tolkien");

        let rendered = serde_json::to_string(&author).unwrap();
        assert!(rendered.contains("authorId"));
    }

    #[test]
    fn book_draft_omits_server_fields() {
        let draft = BookDraft {
            book_name: "The Hobbit".into(),
            price: 14.99,
            quantity: 3,
            author_id: 1,
            publisher_id: 2,
            category_id: 3,
            book_type_id: 4,
        };
        let rendered = serde_json::to_string(&draft).unwrap();
        assert!(!rendered.contains("bookId"));
        assert!(!rendered.contains("coverUrl"));
    }

    #[test]
    fn resource_paths_are_distinct() {
        let paths = [
            Authors::PATH,
            Books::PATH,
            Publishers::PATH,
            Distributors::PATH,
            Categories::PATH,
            BookTypes::PATH,
            Users::PATH,
            OrderStatuses::PATH,
            RefundStatuses::PATH,
        ];
        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn user_draft_password_is_optional() {
        let json = r#"{"email":"a@b.c","fullName":"Ada","role":"admin","enabled":true}"#;
        let draft: UserDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.password, None);
    }
}
