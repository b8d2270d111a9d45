//! Collection commands: list, create, update, delete.
//!
//! Each command resolves the resource name to its marker type and runs the
//! generic helper; the store implementation is identical for all nine
//! resources.

use std::error::Error;

use bookstall_protocol::{
    AdminResource, Authors, BookTypes, Books, Categories, Distributors, OrderStatuses, PageQuery,
    Publishers, RefundStatuses, Users,
};
use bookstall_store::normalize_keyword;

use super::{CliContext, ResourceKind};

/// Dispatches a generic helper for the named resource.
macro_rules! for_resource {
    ($kind:expr, $helper:ident ( $($arg:expr),* )) => {
        match $kind {
            ResourceKind::Authors => $helper::<Authors>($($arg),*).await,
            ResourceKind::Books => $helper::<Books>($($arg),*).await,
            ResourceKind::Publishers => $helper::<Publishers>($($arg),*).await,
            ResourceKind::Distributors => $helper::<Distributors>($($arg),*).await,
            ResourceKind::Categories => $helper::<Categories>($($arg),*).await,
            ResourceKind::BookTypes => $helper::<BookTypes>($($arg),*).await,
            ResourceKind::Users => $helper::<Users>($($arg),*).await,
            ResourceKind::OrderStatus => $helper::<OrderStatuses>($($arg),*).await,
            ResourceKind::RefundStatus => $helper::<RefundStatuses>($($arg),*).await,
        }
    };
}

/// Lists one page of a resource.
pub async fn list(
    context: &CliContext,
    kind: ResourceKind,
    index: u32,
    size: Option<u32>,
    keyword: Option<&str>,
    filters: &[String],
) -> Result<(), Box<dyn Error>> {
    let size = size.unwrap_or(context.config.page_size);
    let filters = parse_filters(filters)?;
    for_resource!(kind, list_resource(context, index, size, keyword, filters))
}

/// Creates an item from a JSON draft.
pub async fn create(
    context: &CliContext,
    kind: ResourceKind,
    data: &str,
) -> Result<(), Box<dyn Error>> {
    for_resource!(kind, create_resource(context, data))
}

/// Updates an item from a JSON draft.
pub async fn update(
    context: &CliContext,
    kind: ResourceKind,
    id: u64,
    data: &str,
) -> Result<(), Box<dyn Error>> {
    for_resource!(kind, update_resource(context, id, data))
}

/// Deletes an item by id.
pub async fn delete(
    context: &CliContext,
    kind: ResourceKind,
    id: u64,
) -> Result<(), Box<dyn Error>> {
    for_resource!(kind, delete_resource(context, id))
}

async fn list_resource<R: AdminResource>(
    context: &CliContext,
    index: u32,
    size: u32,
    keyword: Option<&str>,
    filters: Vec<(String, String)>,
) -> Result<(), Box<dyn Error>> {
    let store = context.store::<R>();
    let mut query = PageQuery::new(index, size).with_keyword(normalize_keyword(keyword));
    query.filters = filters;
    store.fetch(query).await?;

    let state = store.state();
    println!("{}", serde_json::to_string_pretty(&state.page.content)?);
    println!(
        "page {} of {} ({} {} total)",
        state.page_index,
        state.page.total_pages.max(1),
        state.page.total_elements,
        R::PATH,
    );
    Ok(())
}

async fn create_resource<R: AdminResource>(
    context: &CliContext,
    data: &str,
) -> Result<(), Box<dyn Error>> {
    let draft: R::Draft = serde_json::from_str(data)?;
    let store = context.store::<R>();
    let created = store.create(&draft).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

async fn update_resource<R: AdminResource>(
    context: &CliContext,
    id: u64,
    data: &str,
) -> Result<(), Box<dyn Error>> {
    let draft: R::Draft = serde_json::from_str(data)?;
    let store = context.store::<R>();
    let updated = store.update(id, &draft).await?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

async fn delete_resource<R: AdminResource>(
    context: &CliContext,
    id: u64,
) -> Result<(), Box<dyn Error>> {
    let store = context.store::<R>();
    store.delete(id).await?;
    Ok(())
}

fn parse_filters(raw: &[String]) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| format!("filter must be key=value, got {pair:?}").into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_key_value_pairs() {
        let parsed = parse_filters(&["categoryId=4".to_string(), "enabled=true".to_string()]).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("categoryId".to_string(), "4".to_string()),
                ("enabled".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_filter_is_rejected() {
        assert!(parse_filters(&["categoryId".to_string()]).is_err());
    }
}
