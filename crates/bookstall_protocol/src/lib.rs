//! # Bookstall Protocol
//!
//! Wire types and error taxonomy for the Bookstall admin API.
//!
//! This crate provides:
//! - The JSON response envelope every endpoint returns
//! - Paginated list payloads and the 1-based page query
//! - Authentication messages (login request, token pair, identity)
//! - The failure taxonomy and status-code classification
//! - The [`AdminResource`] trait and the nine admin resource definitions
//!
//! ## Conventions
//!
//! Every endpoint wraps its payload in `{ success, message, result }`.
//! List payloads carry `{ content, totalPages, totalElements }` and page
//! indexes are 1-based. JSON field names are camelCase on the wire.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod envelope;
mod error;
mod resources;

pub use auth::{LoginRequest, TokenPair, UserIdentity};
pub use envelope::{Envelope, PageData, PageQuery};
pub use error::{classify_status, ApiError, ApiResult};
pub use resources::{
    AdminResource, AdminUser, Author, AuthorDraft, Authors, Book, BookDraft, BookType,
    BookTypeDraft, BookTypes, Books, Categories, Category, CategoryDraft, Distributor,
    DistributorDraft, Distributors, OrderStatus, OrderStatusDraft, OrderStatuses, Publisher,
    PublisherDraft, Publishers, RefundStatus, RefundStatusDraft, RefundStatuses, UserDraft, Users,
};
