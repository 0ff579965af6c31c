//! Table definitions, one statement per entry.

use common::models::DbBackend;

const MYSQL: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS `tenants` (
        `tenant_id`         BIGINT        NOT NULL AUTO_INCREMENT,
        `first_name`        VARCHAR(100)  NOT NULL,
        `last_name`         VARCHAR(100)  NOT NULL,
        `email`             VARCHAR(255)  NOT NULL,
        `phone`             VARCHAR(20)   NOT NULL,
        `identity_number`   VARCHAR(50)   NOT NULL,
        `emergency_contact` VARCHAR(100)  DEFAULT NULL,
        `emergency_phone`   VARCHAR(20)   DEFAULT NULL,
        `created_at`        DATETIME      NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (`tenant_id`),
        UNIQUE KEY `uk_tenants_email` (`email`)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE IF NOT EXISTS `properties` (
        `property_id`   BIGINT        NOT NULL AUTO_INCREMENT,
        `property_name` VARCHAR(100)  NOT NULL,
        `address`       VARCHAR(255)  NOT NULL,
        `city`          VARCHAR(50)   NOT NULL,
        `postal_code`   VARCHAR(10)   DEFAULT NULL,
        `property_type` VARCHAR(50)   NOT NULL,
        `bedrooms`      BIGINT        DEFAULT NULL,
        `bathrooms`     BIGINT        DEFAULT NULL,
        `size_sqm`      DOUBLE        DEFAULT NULL,
        `monthly_rent`  DOUBLE        NOT NULL,
        `is_furnished`  BIGINT        NOT NULL DEFAULT 0,
        `description`   TEXT          DEFAULT NULL,
        `status`        VARCHAR(20)   NOT NULL DEFAULT 'Available',
        `created_at`    DATETIME      NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (`property_id`),
        KEY `idx_properties_city` (`city`),
        KEY `idx_properties_type` (`property_type`)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE IF NOT EXISTS `property_images` (
        `image_id`    BIGINT        NOT NULL AUTO_INCREMENT,
        `property_id` BIGINT        NOT NULL,
        `image_url`   VARCHAR(512)  NOT NULL,
        PRIMARY KEY (`image_id`),
        CONSTRAINT `fk_images_property` FOREIGN KEY (`property_id`)
            REFERENCES `properties` (`property_id`) ON DELETE CASCADE
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE IF NOT EXISTS `maintenance_requests` (
        `request_id`  BIGINT        NOT NULL AUTO_INCREMENT,
        `property_id` BIGINT        NOT NULL,
        `tenant_id`   BIGINT        NOT NULL,
        `issue_type`  VARCHAR(50)   NOT NULL,
        `description` TEXT          NOT NULL,
        `priority`    VARCHAR(10)   NOT NULL DEFAULT 'Medium',
        `status`      VARCHAR(20)   NOT NULL DEFAULT 'Pending',
        `created_at`  DATETIME      NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (`request_id`),
        CONSTRAINT `fk_requests_property` FOREIGN KEY (`property_id`)
            REFERENCES `properties` (`property_id`),
        CONSTRAINT `fk_requests_tenant` FOREIGN KEY (`tenant_id`)
            REFERENCES `tenants` (`tenant_id`)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
];

const SQLITE: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS tenants (
        tenant_id         INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name        TEXT    NOT NULL,
        last_name         TEXT    NOT NULL,
        email             TEXT    NOT NULL UNIQUE,
        phone             TEXT    NOT NULL,
        identity_number   TEXT    NOT NULL,
        emergency_contact TEXT,
        emergency_phone   TEXT,
        created_at        TEXT    NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS properties (
        property_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        property_name TEXT    NOT NULL,
        address       TEXT    NOT NULL,
        city          TEXT    NOT NULL,
        postal_code   TEXT,
        property_type TEXT    NOT NULL,
        bedrooms      INTEGER,
        bathrooms     INTEGER,
        size_sqm      REAL,
        monthly_rent  REAL    NOT NULL,
        is_furnished  INTEGER NOT NULL DEFAULT 0,
        description   TEXT,
        status        TEXT    NOT NULL DEFAULT 'Available',
        created_at    TEXT    NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS property_images (
        image_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        property_id INTEGER NOT NULL REFERENCES properties (property_id) ON DELETE CASCADE,
        image_url   TEXT    NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS maintenance_requests (
        request_id  INTEGER PRIMARY KEY AUTOINCREMENT,
        property_id INTEGER NOT NULL REFERENCES properties (property_id),
        tenant_id   INTEGER NOT NULL REFERENCES tenants (tenant_id),
        issue_type  TEXT    NOT NULL,
        description TEXT    NOT NULL,
        priority    TEXT    NOT NULL DEFAULT 'Medium',
        status      TEXT    NOT NULL DEFAULT 'Pending',
        created_at  TEXT    NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
];

/// Returns the DDL statements for `backend`, in dependency order.
pub fn statements(backend: DbBackend) -> &'static [&'static str] {
    match backend {
        DbBackend::MySQL => &MYSQL,
        DbBackend::SQLite => &SQLITE,
    }
}
