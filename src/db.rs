// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Quincena", "quincena"));

/// Default category set; seeded once at init, user categories come after.
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Comida", "#ef4444", "🍽️"),
    ("Entretenimiento", "#8b5cf6", "🎬"),
    ("Familia", "#3b82f6", "👨‍👩‍👧‍👦"),
    ("Transporte", "#10b981", "🚗"),
    ("Salud", "#f59e0b", "🏥"),
    ("Educación", "#6366f1", "📚"),
    ("Ropa", "#ec4899", "👕"),
    ("Servicios", "#14b8a6", "💡"),
    ("Vivienda", "#f97316", "🏠"),
    ("Otros", "#6b7280", "📦"),
];

/// Fallback bucket for statement imports whose category name is unknown.
pub const FALLBACK_CATEGORY: &str = "Otros";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("quincena.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        color TEXT NOT NULL,
        icon TEXT NOT NULL,
        is_custom INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS credit_cards(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        bank TEXT NOT NULL,
        name TEXT NOT NULL,
        last4_digits TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT '#6b7280',
        cut_day INTEGER NOT NULL CHECK(cut_day BETWEEN 1 AND 31),
        payment_days INTEGER NOT NULL CHECK(payment_days BETWEEN 1 AND 60),
        annual_interest_rate TEXT NOT NULL,
        moratory_interest_rate TEXT NOT NULL,
        min_payment_percentage TEXT NOT NULL,
        credit_limit TEXT NOT NULL,
        current_balance TEXT NOT NULL DEFAULT '0',
        available_credit TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        amount TEXT NOT NULL,
        description TEXT NOT NULL,
        date TEXT NOT NULL,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        credit_card_id INTEGER,
        source_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(credit_card_id) REFERENCES credit_cards(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_source ON transactions(source_id);

    CREATE TABLE IF NOT EXISTS transaction_tags(
        transaction_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        PRIMARY KEY(transaction_id, category_id),
        FOREIGN KEY(transaction_id) REFERENCES transactions(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS installment_purchases(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        total_amount TEXT NOT NULL,
        number_of_months INTEGER NOT NULL CHECK(number_of_months > 0),
        monthly_payment TEXT NOT NULL,
        start_date TEXT NOT NULL,
        description TEXT,
        credit_card_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(credit_card_id) REFERENCES credit_cards(id) ON DELETE SET NULL
    );

    CREATE TABLE IF NOT EXISTS installment_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        purchase_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        due_date TEXT NOT NULL,
        paid_date TEXT,
        status TEXT NOT NULL CHECK(status IN ('pending','paid')),
        payment_number INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(purchase_id) REFERENCES installment_purchases(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_installment_payments_due ON installment_payments(due_date);

    CREATE TABLE IF NOT EXISTS recurring_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('rent','car_loan','mortgage','other')),
        monthly_amount TEXT NOT NULL,
        payment_day INTEGER NOT NULL CHECK(payment_day BETWEEN 1 AND 31),
        start_date TEXT NOT NULL,
        end_date TEXT,
        description TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS fixed_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('monthly','yearly','biweekly')),
        start_date TEXT NOT NULL,
        end_date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS credit_card_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_id INTEGER NOT NULL,
        cycle_start TEXT NOT NULL,
        cycle_end TEXT NOT NULL,
        amount TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('pending','paid')),
        paid_date TEXT,
        UNIQUE(card_id, cycle_start, cycle_end),
        FOREIGN KEY(card_id) REFERENCES credit_cards(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('cash','bank','investment','other')),
        name TEXT NOT NULL,
        value TEXT NOT NULL,
        currency TEXT NOT NULL DEFAULT 'MXN',
        annual_value_change REAL NOT NULL DEFAULT 0,
        purchase_date TEXT NOT NULL,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS liabilities(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('credit_card','loan','mortgage','other')),
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        interest_rate TEXT,
        due_date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS investments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT,
        type TEXT NOT NULL CHECK(type IN ('stock','bond','fund','other')),
        quantity TEXT NOT NULL,
        purchase_price TEXT NOT NULL,
        purchase_date TEXT NOT NULL,
        current_price TEXT NOT NULL,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS investment_opportunities(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('fixed_income','variable_income')),
        name TEXT NOT NULL,
        expected_return REAL NOT NULL,
        risk_level TEXT NOT NULL CHECK(risk_level IN ('low','medium','high')),
        min_amount TEXT NOT NULL,
        description TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    seed_default_categories(conn)?;
    Ok(())
}

fn seed_default_categories(conn: &Connection) -> Result<()> {
    for (name, color, icon) in DEFAULT_CATEGORIES {
        conn.execute(
            "INSERT INTO categories(name, color, icon, is_custom) VALUES(?1, ?2, ?3, 0)
             ON CONFLICT(name) DO NOTHING",
            rusqlite::params![name, color, icon],
        )?;
    }
    Ok(())
}
