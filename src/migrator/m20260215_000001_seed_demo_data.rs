use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Demo rows so the portal is explorable after first boot. Passwords are
// plaintext on purpose: credential comparison mirrors the legacy system.

const SEED: &str = r#"
INSERT INTO employee (employee_id, name, username, password, role) VALUES
    (1, 'Margaret Okafor', 'margaret', 'manager123', 'Manager'),
    (2, 'Tom Briggs', 'tom', 'keeper123', 'Zookeeper'),
    (3, 'Dr. Lena Voss', 'lena', 'vet123', 'Veterinarian'),
    (4, 'Sam Pruitt', 'sam', 'intern123', 'Intern')
ON CONFLICT (employee_id) DO NOTHING;
SELECT setval(pg_get_serial_sequence('employee', 'employee_id'), (SELECT MAX(employee_id) FROM employee));

INSERT INTO habitat (habitat_id, name, type, capacity) VALUES
    (1, 'Savanna North', 'Grassland', 4),
    (2, 'Reptile House', 'Indoor', 6),
    (3, 'Penguin Cove', 'Aquatic', 8),
    (4, 'Aviary Dome', 'Aviary', 10)
ON CONFLICT (habitat_id) DO NOTHING;
SELECT setval(pg_get_serial_sequence('habitat', 'habitat_id'), (SELECT MAX(habitat_id) FROM habitat));

INSERT INTO animal (animal_id, name, species, gender, age, habitat_id) VALUES
    (101, 'Zuri', 'Lion', 'Female', 6, 1),
    (102, 'Kesi', 'Zebra', 'Female', 4, 1),
    (103, 'Monty', 'Python', 'Male', 9, 2),
    (104, 'Pip', 'Gentoo Penguin', 'Male', 2, 3),
    (105, 'Luna', 'Gentoo Penguin', 'Female', 3, 3)
ON CONFLICT (animal_id) DO NOTHING;

INSERT INTO visitor (visitor_id, f_name, l_name, age, phone_no) VALUES
    (1, 'Ada', 'Nwosu', 29, '555-0101'),
    (2, 'Ben', 'Carver', 41, '555-0102'),
    (3, 'Chloe', 'Delgado', 17, '555-0103'),
    (4, 'Dev', 'Iyer', 35, '555-0104')
ON CONFLICT (visitor_id) DO NOTHING;
SELECT setval(pg_get_serial_sequence('visitor', 'visitor_id'), (SELECT MAX(visitor_id) FROM visitor));

INSERT INTO visits (visitor_id, animal_id, visit_date)
SELECT v.* FROM (VALUES
    (1, 101, DATE '2026-02-10'),
    (1, 104, DATE '2026-02-10'),
    (2, 103, DATE '2026-02-11')
) AS v(visitor_id, animal_id, visit_date)
WHERE NOT EXISTS (SELECT 1 FROM visits);

INSERT INTO veterinary_status (record_id, animal_id, vet_id, checkup_date, status, notes) VALUES
    (1001, 101, 3, DATE '2026-02-01', 'Healthy', 'Annual checkup, no findings.'),
    (1002, 104, 3, DATE '2026-02-05', 'Under observation', 'Slight limp on left foot.')
ON CONFLICT (record_id) DO NOTHING;

INSERT INTO ticket (visitor_id, date, price)
SELECT t.* FROM (VALUES
    (1, DATE '2026-02-10', 24.50),
    (2, DATE '2026-02-10', 24.50),
    (3, DATE '2026-02-11', 18.00),
    (4, DATE '2026-02-11', 24.50)
) AS t(visitor_id, date, price)
WHERE NOT EXISTS (SELECT 1 FROM ticket);
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(SEED).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DELETE FROM ticket;").await?;
        conn.execute_unprepared("DELETE FROM veterinary_status;").await?;
        conn.execute_unprepared("DELETE FROM visits;").await?;
        conn.execute_unprepared("DELETE FROM visitor;").await?;
        conn.execute_unprepared("DELETE FROM animal;").await?;
        conn.execute_unprepared("DELETE FROM habitat;").await?;
        conn.execute_unprepared("DELETE FROM employee;").await?;
        Ok(())
    }
}
