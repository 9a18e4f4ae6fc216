use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// The handler layer treats these routines as an opaque contract:
// two scalar report functions, one capacity-guarded insert returning a
// single `message` row, and a delete-guard trigger on habitat.

const CREATE_FN_TOTAL_ANIMAL_COUNT: &str = r#"
CREATE OR REPLACE FUNCTION fn_GetTotalAnimalCount() RETURNS integer
LANGUAGE sql STABLE AS $$
    SELECT COUNT(*)::integer FROM animal;
$$;
"#;

const CREATE_FN_TOTAL_CAPACITY: &str = r#"
CREATE OR REPLACE FUNCTION fn_GetTotalCapacity() RETURNS integer
LANGUAGE sql STABLE AS $$
    SELECT COALESCE(SUM(capacity), 0)::integer FROM habitat;
$$;
"#;

const CREATE_SP_ADD_NEW_ANIMAL: &str = r#"
CREATE OR REPLACE FUNCTION sp_AddNewAnimal(
    p_animal_id integer,
    p_name varchar,
    p_species varchar,
    p_gender varchar,
    p_age integer,
    p_habitat_id integer
) RETURNS TABLE(message text)
LANGUAGE plpgsql AS $$
DECLARE
    v_capacity integer;
    v_occupancy integer;
BEGIN
    -- Locking the habitat row makes the capacity check and the insert
    -- atomic with respect to concurrent callers.
    SELECT capacity INTO v_capacity
    FROM habitat WHERE habitat_id = p_habitat_id
    FOR UPDATE;

    IF v_capacity IS NULL THEN
        RETURN QUERY SELECT 'Error: Habitat not found.'::text;
        RETURN;
    END IF;

    SELECT COUNT(*) INTO v_occupancy
    FROM animal WHERE habitat_id = p_habitat_id;

    IF v_occupancy >= v_capacity THEN
        RETURN QUERY SELECT 'Error: Habitat is at full capacity. Cannot add new animal.'::text;
        RETURN;
    END IF;

    INSERT INTO animal (animal_id, name, species, gender, age, habitat_id)
    VALUES (p_animal_id, p_name, p_species, p_gender, p_age, p_habitat_id);

    RETURN QUERY SELECT ('New animal ' || p_name || ' added successfully.')::text;
END;
$$;
"#;

const CREATE_HABITAT_DELETE_GUARD: &str = r#"
CREATE OR REPLACE FUNCTION fn_habitat_delete_guard() RETURNS trigger
LANGUAGE plpgsql AS $$
BEGIN
    IF (SELECT COUNT(*) FROM animal WHERE habitat_id = OLD.habitat_id) > 0 THEN
        RAISE EXCEPTION 'Cannot delete habitat. It still contains animals.';
    END IF;
    RETURN OLD;
END;
$$;

DROP TRIGGER IF EXISTS trg_before_habitat_delete ON habitat;
CREATE TRIGGER trg_before_habitat_delete
    BEFORE DELETE ON habitat
    FOR EACH ROW
    EXECUTE FUNCTION fn_habitat_delete_guard();
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared(CREATE_FN_TOTAL_ANIMAL_COUNT).await?;
        conn.execute_unprepared(CREATE_FN_TOTAL_CAPACITY).await?;
        conn.execute_unprepared(CREATE_SP_ADD_NEW_ANIMAL).await?;
        conn.execute_unprepared(CREATE_HABITAT_DELETE_GUARD).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP TRIGGER IF EXISTS trg_before_habitat_delete ON habitat;")
            .await?;
        conn.execute_unprepared("DROP FUNCTION IF EXISTS fn_habitat_delete_guard();")
            .await?;
        conn.execute_unprepared(
            "DROP FUNCTION IF EXISTS sp_AddNewAnimal(integer, varchar, varchar, varchar, integer, integer);",
        )
        .await?;
        conn.execute_unprepared("DROP FUNCTION IF EXISTS fn_GetTotalCapacity();")
            .await?;
        conn.execute_unprepared("DROP FUNCTION IF EXISTS fn_GetTotalAnimalCount();")
            .await?;
        Ok(())
    }
}
