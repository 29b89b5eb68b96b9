//! The fixed set of content repositories searched by `/search/all`

use super::descriptor::{
    CategorySource, LocalizedField, Relation, SearchField, SourceDescriptor, UrlTemplate,
    PER_SOURCE_CAP,
};

const TITLE: LocalizedField = LocalizedField::new("title", "title_en", "title_be");
const NAME: LocalizedField = LocalizedField::new("name", "name_en", "name_be");
const CONTENT: LocalizedField = LocalizedField::new("content", "content_en", "content_be");
const DESCRIPTION: LocalizedField =
    LocalizedField::new("description", "description_en", "description_be");

/// Every source, in dispatch order
pub fn default_catalog() -> Vec<SourceDescriptor> {
    vec![
        news(),
        vacancies(),
        branches(),
        management(),
        section_categories("about", "about_categories", "/about", "About"),
        section_pages("about", "about_page_content", "/about", "About"),
        section_categories("services", "services_categories", "/services", "Services"),
        section_pages("services", "services_page_content", "/services", "Services"),
        section_categories(
            "aeronautical",
            "aeronautical_categories",
            "/aeronautical",
            "Aeronautical information",
        ),
        section_pages(
            "aeronautical",
            "aeronautical_page_content",
            "/aeronautical",
            "Aeronautical information",
        ),
        section_categories("social", "social_categories", "/social", "Social"),
        section_pages("social", "social_page_content", "/social", "Social"),
        section_categories("appeals", "appeals_categories", "/appeals", "Appeals"),
        section_pages("appeals", "appeals_page_content", "/appeals", "Appeals"),
    ]
}

fn news() -> SourceDescriptor {
    let excerpt = LocalizedField::new("excerpt", "excerpt_en", "excerpt_be");
    SourceDescriptor {
        source_type: "news",
        table: "news",
        searchable_fields: vec![
            SearchField::Localized(TITLE),
            SearchField::Localized(excerpt),
            SearchField::Localized(CONTENT),
        ],
        title: TITLE,
        excerpt: Some(excerpt),
        url: UrlTemplate::ById { prefix: "/news" },
        category: CategorySource::Relation(Relation {
            table: "news_categories",
            foreign_key: "category_id",
            name: NAME,
            fallback: "News",
        }),
        date_column: Some("created_at"),
        requires_active: false,
        cap: PER_SOURCE_CAP,
    }
}

fn vacancies() -> SourceDescriptor {
    let requirements = LocalizedField::new("requirements", "requirements_en", "requirements_be");
    SourceDescriptor {
        source_type: "vacancy",
        table: "vacancies",
        searchable_fields: vec![
            SearchField::Localized(TITLE),
            SearchField::Localized(DESCRIPTION),
            SearchField::Localized(requirements),
        ],
        title: TITLE,
        excerpt: Some(DESCRIPTION),
        url: UrlTemplate::ById {
            prefix: "/vacancies",
        },
        category: CategorySource::Literal("Vacancies"),
        date_column: Some("created_at"),
        requires_active: false,
        cap: PER_SOURCE_CAP,
    }
}

fn branches() -> SourceDescriptor {
    let address = LocalizedField::new("address", "address_en", "address_be");
    SourceDescriptor {
        source_type: "branch",
        table: "branches",
        searchable_fields: vec![
            SearchField::Localized(NAME),
            SearchField::Localized(address),
            SearchField::Plain("phone"),
            SearchField::Plain("email"),
        ],
        title: NAME,
        excerpt: Some(address),
        url: UrlTemplate::Fixed("/about/branches"),
        category: CategorySource::Literal("Branches"),
        date_column: Some("created_at"),
        requires_active: false,
        cap: PER_SOURCE_CAP,
    }
}

fn management() -> SourceDescriptor {
    let full_name = LocalizedField::new("full_name", "full_name_en", "full_name_be");
    let position = LocalizedField::new("position", "position_en", "position_be");
    let biography = LocalizedField::new("biography", "biography_en", "biography_be");
    SourceDescriptor {
        source_type: "management",
        table: "management",
        searchable_fields: vec![
            SearchField::Localized(full_name),
            SearchField::Localized(position),
            SearchField::Localized(biography),
        ],
        title: full_name,
        excerpt: Some(position),
        url: UrlTemplate::Fixed("/about/management"),
        category: CategorySource::Literal("Management"),
        date_column: Some("created_at"),
        requires_active: false,
        cap: PER_SOURCE_CAP,
    }
}

/// Category-style source: only active rows, no timestamp
fn section_categories(
    source_type: &'static str,
    table: &'static str,
    url_prefix: &'static str,
    label: &'static str,
) -> SourceDescriptor {
    SourceDescriptor {
        source_type,
        table,
        searchable_fields: vec![
            SearchField::Localized(NAME),
            SearchField::Localized(DESCRIPTION),
        ],
        title: NAME,
        excerpt: Some(DESCRIPTION),
        url: UrlTemplate::ByPageType {
            prefix: url_prefix,
            column: "page_type",
        },
        category: CategorySource::Literal(label),
        date_column: None,
        requires_active: true,
        cap: PER_SOURCE_CAP,
    }
}

fn section_pages(
    source_type: &'static str,
    table: &'static str,
    url_prefix: &'static str,
    label: &'static str,
) -> SourceDescriptor {
    SourceDescriptor {
        source_type,
        table,
        searchable_fields: vec![
            SearchField::Localized(TITLE),
            SearchField::Localized(CONTENT),
        ],
        title: TITLE,
        excerpt: Some(CONTENT),
        url: UrlTemplate::ByPageType {
            prefix: url_prefix,
            column: "page_type",
        },
        category: CategorySource::Literal(label),
        date_column: Some("created_at"),
        requires_active: false,
        cap: PER_SOURCE_CAP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::rank::{type_priority, UNKNOWN_TYPE_PRIORITY};
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_fourteen_sources() {
        assert_eq!(default_catalog().len(), 14);
    }

    #[test]
    fn test_tables_are_unique() {
        let catalog = default_catalog();
        let tables: HashSet<_> = catalog.iter().map(|d| d.table).collect();
        assert_eq!(tables.len(), catalog.len());
    }

    #[test]
    fn test_every_source_is_capped_at_twenty() {
        assert!(default_catalog().iter().all(|d| d.cap == 20));
    }

    #[test]
    fn test_only_category_tables_require_active_flag() {
        for descriptor in default_catalog() {
            assert_eq!(
                descriptor.requires_active,
                descriptor.table.ends_with("_categories"),
                "unexpected active filter on {}",
                descriptor.table
            );
        }
    }

    #[test]
    fn test_every_source_type_has_a_known_priority() {
        for descriptor in default_catalog() {
            assert_ne!(
                type_priority(descriptor.source_type),
                UNKNOWN_TYPE_PRIORITY,
                "{} has no ranking entry",
                descriptor.source_type
            );
        }
    }

    #[test]
    fn test_news_category_comes_from_relation() {
        let news = &default_catalog()[0];
        assert_eq!(news.source_type, "news");
        match news.category {
            CategorySource::Relation(relation) => {
                assert_eq!(relation.table, "news_categories");
                assert_eq!(relation.fallback, "News");
            }
            CategorySource::Literal(_) => panic!("news category must be resolved from relation"),
        }
    }
}
