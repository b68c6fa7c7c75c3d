//! Table definitions applied at startup.
//!
//! Child rows reference their owners with `ON DELETE CASCADE`, so removing a
//! user or product clears the matching cart and wishlist lines.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        email         TEXT    NOT NULL UNIQUE,
        password_hash TEXT    NOT NULL,
        is_admin      BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        name           TEXT    NOT NULL,
        description    TEXT,
        price          REAL    NOT NULL CHECK (price > 0),
        stock          INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        image_filename TEXT,
        category       TEXT    NOT NULL,
        date_added     TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cart_items (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        quantity   INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
        user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        UNIQUE (user_id, product_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wishlist_items (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        UNIQUE (user_id, product_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
];
