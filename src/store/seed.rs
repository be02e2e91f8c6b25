//! Built-in data written to fresh data directories.
//!
//! The catalog, shop services and demo accounts match the site content
//! the shop has always shipped with; a deployment replaces them by
//! editing the JSON files or through the back-office.

use secrecy::SecretString;
use uuid::Uuid;

use super::models::{Category, Membership, Product, User, Visit};

/// Fixed list of workshop services shown on the services page.
pub const SHOP_SERVICES: [&str; 7] = [
    "Mecánica",
    "Pintura",
    "Alistamiento tecnomecánica",
    "Electricidad",
    "Torno",
    "Prensa",
    "Mecánica rápida",
];

pub(super) fn categories() -> Vec<Category> {
    [
        ("naked", "Naked"),
        ("adventure", "Adventure"),
        ("sport", "Sport"),
        ("scooter", "Scooter"),
        ("enduro", "Enduro"),
    ]
    .into_iter()
    .map(|(slug, name)| Category {
        slug: slug.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub(super) fn products() -> Vec<Product> {
    [
        ("nk-helmet-pro", "Casco Pro Naked", 320_000, "naked"),
        ("nk-gloves", "Guantes Naked", 95_000, "naked"),
        ("adv-jacket", "Chaqueta Adventure", 420_000, "adventure"),
        ("adv-panniers", "Maletas Adventure", 650_000, "adventure"),
        ("sp-boots", "Botas Sport", 380_000, "sport"),
        ("sp-brakes", "Kit Frenos Sport", 210_000, "sport"),
        ("sc-cover", "Cubierta Scooter", 140_000, "scooter"),
        ("sc-lock", "Candado Scooter", 60_000, "scooter"),
        ("en-handguards", "Paramanos Enduro", 130_000, "enduro"),
        ("en-tyres", "Llantas Enduro", 560_000, "enduro"),
    ]
    .into_iter()
    .map(|(id, name, price, category)| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        category: category.to_string(),
        image: "/images/download.png".to_string(),
    })
    .collect()
}

pub(super) fn users() -> Vec<User> {
    vec![
        User {
            id: Uuid::new_v4(),
            email: "miembro@gorillaz.co".to_string(),
            password: SecretString::from("gorillaz123".to_string()),
            name: "Miembro del Club".to_string(),
            is_admin: false,
            membership: Some(Membership {
                level: "Premium".to_string(),
                since: "2024-06-01".to_string(),
                expires: "2026-06-01".to_string(),
                benefits: vec![
                    "Descuento 15% en mecánica rápida".to_string(),
                    "Lavado gratis cada 3 visitas".to_string(),
                    "Eventos y rutas exclusivas en Bogotá".to_string(),
                ],
            }),
            visits: vec![
                Visit {
                    date: "2025-02-15".to_string(),
                    service: "Mecánica rápida - cambio de aceite".to_string(),
                },
                Visit {
                    date: "2025-05-22".to_string(),
                    service: "Electricidad - revisión de batería".to_string(),
                },
            ],
        },
        User {
            id: Uuid::new_v4(),
            email: "taller@gorillaz.co".to_string(),
            password: SecretString::from("taller123".to_string()),
            name: "Taller Gorillaz".to_string(),
            is_admin: true,
            membership: None,
            visits: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_product_points_at_a_seeded_category() {
        let categories = categories();
        for product in products() {
            assert!(
                categories.iter().any(|c| c.slug == product.category),
                "product {} references unknown category {}",
                product.id,
                product.category
            );
        }
    }

    #[test]
    fn seed_users_cover_both_roles() {
        let users = users();
        assert!(users.iter().any(|u| u.is_admin));
        assert!(users.iter().any(|u| !u.is_admin && u.membership.is_some()));
    }
}
