//! In-memory state persisted as flat JSON files.
//!
//! Handlers delegate everything to this layer: every operation returns
//! `anyhow::Result` (or an outcome enum for expected conflicts) and the
//! caller maps it to HTTP.
//!
//! Each collection is one file under the data directory. Mutations take
//! the write lock, change the in-memory vector, then rewrite the whole
//! file. There is intentionally no atomic rename and no cross-process
//! locking; that matches the behavior this service replaces.

pub mod models;
pub mod seed;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::RwLock};
use tracing::debug;
use ulid::Ulid;
use uuid::Uuid;

use models::{Appointment, Category, Course, Event, Membership, Product, User, Visit};

const CATEGORIES_FILE: &str = "categories.json";
const PRODUCTS_FILE: &str = "products.json";
const COURSES_FILE: &str = "courses.json";
const EVENTS_FILE: &str = "events.json";
const APPOINTMENTS_FILE: &str = "appointments.json";
const USERS_FILE: &str = "users.json";
const AVAILABILITY_FILE: &str = "availability.json";

/// Outcome when inserting a product with a caller-chosen id.
#[derive(Debug)]
pub enum CreateProductOutcome {
    Created,
    Conflict,
    UnknownCategory,
}

/// Outcome when replacing a product's fields.
#[derive(Debug)]
pub enum UpdateProductOutcome {
    Updated(Product),
    NotFound,
    UnknownCategory,
}

/// Outcome when creating a user from the back-office.
#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(User),
    EmailTaken,
}

/// Outcome when booking an appointment against the blocked-date list.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(Appointment),
    DateBlocked,
}

struct AppData {
    categories: Vec<Category>,
    products: Vec<Product>,
    courses: Vec<Course>,
    events: Vec<Event>,
    appointments: Vec<Appointment>,
    users: Vec<User>,
    blocked_dates: Vec<String>,
}

pub struct Store {
    data_dir: PathBuf,
    data: RwLock<AppData>,
}

impl Store {
    /// Open the data directory, loading every collection.
    ///
    /// Missing files are seeded with the built-in catalog and demo
    /// accounts; present files are parsed strictly so a corrupt file
    /// fails startup instead of silently dropping data.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a
    /// collection file cannot be read, parsed or seeded.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let categories = load_or_seed(&data_dir, CATEGORIES_FILE, seed::categories).await?;
        let products = load_or_seed(&data_dir, PRODUCTS_FILE, seed::products).await?;
        let courses = load_or_seed(&data_dir, COURSES_FILE, Vec::new).await?;
        let events = load_or_seed(&data_dir, EVENTS_FILE, Vec::new).await?;
        let appointments = load_or_seed(&data_dir, APPOINTMENTS_FILE, Vec::new).await?;
        let users = load_or_seed(&data_dir, USERS_FILE, seed::users).await?;
        let blocked_dates = load_or_seed(&data_dir, AVAILABILITY_FILE, Vec::new).await?;

        Ok(Self {
            data_dir,
            data: RwLock::new(AppData {
                categories,
                products,
                courses,
                events,
                appointments,
                users,
                blocked_dates,
            }),
        })
    }

    async fn persist<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        // Whole-file rewrite. The in-memory change is already applied when
        // this runs, so a failed write leaves memory ahead of disk, exactly
        // like the site this replaces.
        let path = self.data_dir.join(file);
        let json = serde_json::to_vec_pretty(value)
            .with_context(|| format!("failed to serialize {file}"))?;
        fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(collection = file, "collection persisted");
        Ok(())
    }

    // --- catalog ---

    pub async fn categories(&self) -> Vec<Category> {
        self.data.read().await.categories.clone()
    }

    /// Products, optionally filtered by category slug. An unknown slug
    /// simply yields an empty list.
    pub async fn products(&self, category: Option<&str>) -> Vec<Product> {
        let data = self.data.read().await;
        match category {
            Some(slug) => data
                .products
                .iter()
                .filter(|p| p.category == slug)
                .cloned()
                .collect(),
            None => data.products.clone(),
        }
    }

    pub async fn product(&self, id: &str) -> Option<Product> {
        self.data
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Insert a product under a caller-chosen id.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn insert_product(&self, product: Product) -> Result<CreateProductOutcome> {
        let mut data = self.data.write().await;
        if !data.categories.iter().any(|c| c.slug == product.category) {
            return Ok(CreateProductOutcome::UnknownCategory);
        }
        if data.products.iter().any(|p| p.id == product.id) {
            return Ok(CreateProductOutcome::Conflict);
        }
        data.products.push(product);
        self.persist(PRODUCTS_FILE, &data.products).await?;
        Ok(CreateProductOutcome::Created)
    }

    /// Replace a product's mutable fields.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn update_product(
        &self,
        id: &str,
        name: String,
        price: i64,
        category: String,
        image: String,
    ) -> Result<UpdateProductOutcome> {
        let mut data = self.data.write().await;
        if !data.categories.iter().any(|c| c.slug == category) {
            return Ok(UpdateProductOutcome::UnknownCategory);
        }
        let Some(product) = data.products.iter_mut().find(|p| p.id == id) else {
            return Ok(UpdateProductOutcome::NotFound);
        };
        product.name = name;
        product.price = price;
        product.category = category;
        product.image = image;
        let updated = product.clone();
        self.persist(PRODUCTS_FILE, &data.products).await?;
        Ok(UpdateProductOutcome::Updated(updated))
    }

    /// Delete a product; `Ok(false)` when the id was already gone.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn delete_product(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        if data.products.len() == before {
            return Ok(false);
        }
        self.persist(PRODUCTS_FILE, &data.products).await?;
        Ok(true)
    }

    // --- courses ---

    pub async fn courses(&self) -> Vec<Course> {
        self.data.read().await.courses.clone()
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn add_course(
        &self,
        title: String,
        description: String,
        date: String,
        price: i64,
    ) -> Result<Course> {
        let course = Course {
            id: Ulid::new().to_string(),
            title,
            description,
            date,
            price,
        };
        let mut data = self.data.write().await;
        data.courses.push(course.clone());
        self.persist(COURSES_FILE, &data.courses).await?;
        Ok(course)
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn update_course(
        &self,
        id: &str,
        title: String,
        description: String,
        date: String,
        price: i64,
    ) -> Result<Option<Course>> {
        let mut data = self.data.write().await;
        let Some(course) = data.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        course.title = title;
        course.description = description;
        course.date = date;
        course.price = price;
        let updated = course.clone();
        self.persist(COURSES_FILE, &data.courses).await?;
        Ok(Some(updated))
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn delete_course(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.courses.len();
        data.courses.retain(|c| c.id != id);
        if data.courses.len() == before {
            return Ok(false);
        }
        self.persist(COURSES_FILE, &data.courses).await?;
        Ok(true)
    }

    // --- events ---

    pub async fn events(&self) -> Vec<Event> {
        self.data.read().await.events.clone()
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn add_event(
        &self,
        title: String,
        description: String,
        date: String,
        location: String,
    ) -> Result<Event> {
        let event = Event {
            id: Ulid::new().to_string(),
            title,
            description,
            date,
            location,
        };
        let mut data = self.data.write().await;
        data.events.push(event.clone());
        self.persist(EVENTS_FILE, &data.events).await?;
        Ok(event)
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn update_event(
        &self,
        id: &str,
        title: String,
        description: String,
        date: String,
        location: String,
    ) -> Result<Option<Event>> {
        let mut data = self.data.write().await;
        let Some(event) = data.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        event.title = title;
        event.description = description;
        event.date = date;
        event.location = location;
        let updated = event.clone();
        self.persist(EVENTS_FILE, &data.events).await?;
        Ok(Some(updated))
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn delete_event(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.events.len();
        data.events.retain(|e| e.id != id);
        if data.events.len() == before {
            return Ok(false);
        }
        self.persist(EVENTS_FILE, &data.events).await?;
        Ok(true)
    }

    // --- appointments & availability ---

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.data.read().await.appointments.clone()
    }

    /// Book an appointment unless the date is blocked.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn book_appointment(
        &self,
        name: String,
        date: String,
        service: String,
    ) -> Result<BookingOutcome> {
        let mut data = self.data.write().await;
        if data.blocked_dates.iter().any(|d| *d == date) {
            return Ok(BookingOutcome::DateBlocked);
        }
        let appointment = Appointment {
            id: Ulid::new().to_string(),
            name,
            date,
            service,
        };
        data.appointments.push(appointment.clone());
        self.persist(APPOINTMENTS_FILE, &data.appointments).await?;
        Ok(BookingOutcome::Created(appointment))
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn delete_appointment(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.appointments.len();
        data.appointments.retain(|a| a.id != id);
        if data.appointments.len() == before {
            return Ok(false);
        }
        self.persist(APPOINTMENTS_FILE, &data.appointments).await?;
        Ok(true)
    }

    pub async fn blocked_dates(&self) -> Vec<String> {
        let mut dates = self.data.read().await.blocked_dates.clone();
        dates.sort_unstable();
        dates
    }

    /// Block a date for bookings; `Ok(false)` when already blocked.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn block_date(&self, date: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        if data.blocked_dates.iter().any(|d| d == date) {
            return Ok(false);
        }
        data.blocked_dates.push(date.to_string());
        self.persist(AVAILABILITY_FILE, &data.blocked_dates).await?;
        Ok(true)
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn unblock_date(&self, date: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.blocked_dates.len();
        data.blocked_dates.retain(|d| d != date);
        if data.blocked_dates.len() == before {
            return Ok(false);
        }
        self.persist(AVAILABILITY_FILE, &data.blocked_dates).await?;
        Ok(true)
    }

    // --- users ---

    pub async fn users(&self) -> Vec<User> {
        self.data.read().await.users.clone()
    }

    pub async fn user_by_id(&self, id: Uuid) -> Option<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Plaintext credential check against the users collection.
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email && u.password.expose_secret() == password)
            .cloned()
    }

    /// Create a user from the back-office.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn add_user(
        &self,
        email: String,
        password: SecretString,
        name: String,
        is_admin: bool,
        membership: Option<Membership>,
    ) -> Result<CreateUserOutcome> {
        let normalized = email.trim().to_lowercase();
        let mut data = self.data.write().await;
        if data
            .users
            .iter()
            .any(|u| u.email.to_lowercase() == normalized)
        {
            return Ok(CreateUserOutcome::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: normalized,
            password,
            name,
            is_admin,
            membership,
            visits: Vec::new(),
        };
        data.users.push(user.clone());
        self.persist(USERS_FILE, &data.users).await?;
        Ok(CreateUserOutcome::Created(user))
    }

    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        if data.users.len() == before {
            return Ok(false);
        }
        self.persist(USERS_FILE, &data.users).await?;
        Ok(true)
    }

    /// Prepend a visit so the newest entry renders first.
    ///
    /// # Errors
    /// Returns an error if persisting the collection fails.
    pub async fn add_visit(&self, user_id: Uuid, visit: Visit) -> Result<bool> {
        let mut data = self.data.write().await;
        let Some(user) = data.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };
        user.visits.insert(0, visit);
        self.persist(USERS_FILE, &data.users).await?;
        Ok(true)
    }
}

async fn load_or_seed<T, F>(data_dir: &Path, file: &str, seed: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    let path = data_dir.join(file);
    match fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let value = seed();
            let json =
                serde_json::to_vec_pretty(&value).with_context(|| format!("failed to seed {file}"))?;
            fs::write(&path, json)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(collection = file, "collection seeded");
            Ok(value)
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path()).await.expect("store should open");
        (dir, store)
    }

    #[tokio::test]
    async fn open_seeds_catalog_and_users() {
        let (_dir, store) = open_temp().await;
        assert_eq!(store.categories().await.len(), 5);
        assert_eq!(store.products(None).await.len(), 10);
        assert!(store
            .authenticate("miembro@gorillaz.co", "gorillaz123")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn category_filter_matches_and_unknown_is_empty() {
        let (_dir, store) = open_temp().await;
        let naked = store.products(Some("naked")).await;
        assert_eq!(naked.len(), 2);
        assert!(naked.iter().all(|p| p.category == "naked"));
        assert!(store.products(Some("cruiser")).await.is_empty());
    }

    #[tokio::test]
    async fn product_crud_round_trips_through_disk() {
        let (dir, store) = open_temp().await;

        let outcome = store
            .insert_product(Product {
                id: "nk-chain".to_string(),
                name: "Cadena Naked".to_string(),
                price: 180_000,
                category: "naked".to_string(),
                image: "/images/download.png".to_string(),
            })
            .await
            .expect("insert");
        assert!(matches!(outcome, CreateProductOutcome::Created));

        // Duplicate id conflicts, unknown category is refused.
        let dup = store
            .insert_product(Product {
                id: "nk-chain".to_string(),
                name: "Otra cadena".to_string(),
                price: 1,
                category: "naked".to_string(),
                image: String::new(),
            })
            .await
            .expect("insert");
        assert!(matches!(dup, CreateProductOutcome::Conflict));

        let bad = store
            .insert_product(Product {
                id: "cr-seat".to_string(),
                name: "Asiento".to_string(),
                price: 1,
                category: "cruiser".to_string(),
                image: String::new(),
            })
            .await
            .expect("insert");
        assert!(matches!(bad, CreateProductOutcome::UnknownCategory));

        // A fresh store over the same directory sees the mutation.
        let reopened = Store::open(dir.path()).await.expect("reopen");
        assert!(reopened.product("nk-chain").await.is_some());

        assert!(store.delete_product("nk-chain").await.expect("delete"));
        assert!(!store.delete_product("nk-chain").await.expect("delete"));
    }

    #[tokio::test]
    async fn update_product_replaces_fields() {
        let (_dir, store) = open_temp().await;
        let outcome = store
            .update_product(
                "nk-gloves",
                "Guantes Naked Pro".to_string(),
                120_000,
                "naked".to_string(),
                "/images/download.png".to_string(),
            )
            .await
            .expect("update");
        match outcome {
            UpdateProductOutcome::Updated(product) => {
                assert_eq!(product.name, "Guantes Naked Pro");
                assert_eq!(product.price, 120_000);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let missing = store
            .update_product(
                "no-such",
                "x".to_string(),
                1,
                "naked".to_string(),
                String::new(),
            )
            .await
            .expect("update");
        assert!(matches!(missing, UpdateProductOutcome::NotFound));
    }

    #[tokio::test]
    async fn booking_respects_blocked_dates() {
        let (_dir, store) = open_temp().await;
        assert!(store.block_date("2026-09-15").await.expect("block"));
        assert!(!store.block_date("2026-09-15").await.expect("block twice"));

        let blocked = store
            .book_appointment(
                "Ana".to_string(),
                "2026-09-15".to_string(),
                "Cambio de llanta".to_string(),
            )
            .await
            .expect("book");
        assert!(matches!(blocked, BookingOutcome::DateBlocked));

        assert!(store.unblock_date("2026-09-15").await.expect("unblock"));
        let created = store
            .book_appointment(
                "Ana".to_string(),
                "2026-09-15".to_string(),
                "Cambio de llanta".to_string(),
            )
            .await
            .expect("book");
        match created {
            BookingOutcome::Created(appointment) => {
                assert!(store
                    .delete_appointment(&appointment.id)
                    .await
                    .expect("delete"));
            }
            BookingOutcome::DateBlocked => panic!("date should be free again"),
        }
    }

    #[tokio::test]
    async fn blocked_dates_come_back_sorted() {
        let (_dir, store) = open_temp().await;
        store.block_date("2026-12-01").await.expect("block");
        store.block_date("2026-01-05").await.expect("block");
        assert_eq!(
            store.blocked_dates().await,
            vec!["2026-01-05".to_string(), "2026-12-01".to_string()]
        );
    }

    #[tokio::test]
    async fn add_user_normalizes_email_and_rejects_duplicates() {
        let (_dir, store) = open_temp().await;
        let outcome = store
            .add_user(
                " Nuevo@Gorillaz.CO ".to_string(),
                SecretString::from("secreto".to_string()),
                "Nuevo".to_string(),
                false,
                None,
            )
            .await
            .expect("add user");
        let CreateUserOutcome::Created(user) = outcome else {
            panic!("expected creation");
        };
        assert_eq!(user.email, "nuevo@gorillaz.co");

        let taken = store
            .add_user(
                "nuevo@gorillaz.co".to_string(),
                SecretString::from("otro".to_string()),
                "Nuevo 2".to_string(),
                false,
                None,
            )
            .await
            .expect("add user");
        assert!(matches!(taken, CreateUserOutcome::EmailTaken));
    }

    #[tokio::test]
    async fn visits_are_prepended() {
        let (_dir, store) = open_temp().await;
        let member = store
            .authenticate("miembro@gorillaz.co", "gorillaz123")
            .await
            .expect("demo member");
        assert!(store
            .add_visit(
                member.id,
                Visit {
                    date: "2026-01-10".to_string(),
                    service: "Pintura tanque".to_string(),
                },
            )
            .await
            .expect("add visit"));
        let refreshed = store.user_by_id(member.id).await.expect("member");
        assert_eq!(refreshed.visits.first().map(|v| v.date.as_str()), Some("2026-01-10"));
        assert_eq!(refreshed.visits.len(), member.visits.len() + 1);
    }

    #[tokio::test]
    async fn corrupt_collection_fails_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(dir.path().join(PRODUCTS_FILE), b"{not json")
            .await
            .expect("write corrupt file");
        assert!(Store::open(dir.path()).await.is_err());
    }
}
