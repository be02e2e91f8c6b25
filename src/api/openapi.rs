use super::handlers::{admin, cart, catalog, club, content, health};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both served
/// and included in the generated `OpenAPI` spec. Handlers that share a path
/// must share a single `routes!` call. Routes added outside (like `/`) are
/// intentionally not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut shop_tag = Tag::new("shop");
    shop_tag.description = Some("Catalog, content and workshop booking".to_string());

    let mut cart_tag = Tag::new("cart");
    cart_tag.description = Some("Session shopping cart and mock checkout".to_string());

    let mut club_tag = Tag::new("club");
    club_tag.description = Some("Member login, panel and visit history".to_string());

    let mut admin_tag = Tag::new("admin");
    admin_tag.description = Some("Back-office management (admin session required)".to_string());

    let mut motoclub_tag = Tag::new("motoclub");
    motoclub_tag.description = Some("Service health and metadata".to_string());

    let mut openapi = cargo_openapi();
    openapi.tags = Some(vec![shop_tag, cart_tag, club_tag, admin_tag, motoclub_tag]);

    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the route to OpenAPI.
    OpenApiRouter::with_openapi(openapi)
        .routes(routes!(health::health))
        .routes(routes!(catalog::catalog))
        .routes(routes!(catalog::product_detail))
        .routes(routes!(cart::get_cart, cart::clear_cart))
        .routes(routes!(cart::add_item))
        .routes(routes!(cart::set_item))
        .routes(routes!(cart::checkout))
        .routes(routes!(club::login::login))
        .routes(routes!(club::session::logout))
        .routes(routes!(club::session::session))
        .routes(routes!(club::panel::panel))
        .routes(routes!(club::panel::add_visit))
        .routes(routes!(content::services))
        .routes(routes!(content::courses))
        .routes(routes!(content::events))
        .routes(routes!(content::availability))
        .routes(routes!(content::create_appointment))
        .routes(routes!(admin::products::create_product))
        .routes(routes!(
            admin::products::update_product,
            admin::products::delete_product
        ))
        .routes(routes!(admin::courses::create_course))
        .routes(routes!(
            admin::courses::update_course,
            admin::courses::delete_course
        ))
        .routes(routes!(admin::events::create_event))
        .routes(routes!(
            admin::events::update_event,
            admin::events::delete_event
        ))
        .routes(routes!(admin::appointments::list_appointments))
        .routes(routes!(admin::appointments::delete_appointment))
        .routes(routes!(admin::users::list_users, admin::users::create_user))
        .routes(routes!(admin::users::delete_user))
        .routes(routes!(admin::availability::block_date))
        .routes(routes!(admin::availability::unblock_date))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    OpenApiBuilder::new().info(info).build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            spec.info.description.as_deref(),
            Some(env!("CARGO_PKG_DESCRIPTION"))
        );

        let contact = spec.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("Taller Gorillaz"));
            assert_eq!(contact.email.as_deref(), Some("taller@gorillaz.co"));
        }

        let license = spec.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.name, "BSD-3-Clause");
            assert_eq!(license.identifier.as_deref(), Some("BSD-3-Clause"));
        }
    }

    #[test]
    fn openapi_tags_and_paths() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "shop"));
        assert!(tags.iter().any(|tag| tag.name == "cart"));
        assert!(tags.iter().any(|tag| tag.name == "club"));
        assert!(tags.iter().any(|tag| tag.name == "admin"));
        assert!(spec.paths.paths.contains_key("/v1/cart/checkout"));
        assert!(spec.paths.paths.contains_key("/v1/admin/users/{id}"));
        assert!(spec.paths.paths.contains_key("/v1/admin/availability/{date}"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Taller Gorillaz <taller@gorillaz.co>"),
            (Some("Taller Gorillaz"), Some("taller@gorillaz.co"))
        );
        assert_eq!(parse_author("Solo Name"), (Some("Solo Name"), None));
        assert_eq!(parse_author("<only@email.co>"), (None, Some("only@email.co")));
    }
}
