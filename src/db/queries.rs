use crate::db::Database;
use crate::error::Result;
use crate::models::{Animal, Herd, WeightRecord};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

// Animal queries

impl Database {
    pub fn create_animal(&self, animal: &Animal) -> Result<()> {
        self.with_conn(|conn| insert_animal(conn, animal))
    }

    pub fn animal_exists(&self, animal_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM animals WHERE id = ?1",
                [animal_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
    }

    pub fn get_animal(&self, animal_id: &str) -> Result<Option<Animal>> {
        self.with_conn(|conn| {
            let animal = conn
                .query_row(
                    "SELECT * FROM animals WHERE id = ?1",
                    [animal_id],
                    row_to_animal,
                )
                .optional()?;

            match animal {
                Some(mut a) => {
                    a.weights = load_weights(conn, &a.id)?;
                    Ok(Some(a))
                }
                None => Ok(None),
            }
        })
    }

    /// The full herd dataset, animals in registration order, each weight log
    /// in logging order.
    pub fn load_herd(&self) -> Result<Herd> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM animals ORDER BY rowid")?;
            let animals = stmt
                .query_map([], row_to_animal)?
                .collect::<rusqlite::Result<Vec<Animal>>>()?;

            let mut herd = Herd { animals };
            for animal in &mut herd.animals {
                animal.weights = load_weights(conn, &animal.id)?;
            }
            Ok(herd)
        })
    }

    pub fn delete_animal(&self, animal_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM animals WHERE id = ?1", [animal_id])?;
            Ok(())
        })
    }

    /// Atomically replace the whole dataset (JSON import).
    pub fn replace_herd(&self, herd: &Herd) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM weights", [])?;
            tx.execute("DELETE FROM animals", [])?;
            for animal in &herd.animals {
                insert_animal(&tx, animal)?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

// Weight log queries

impl Database {
    pub fn insert_weight(&self, animal_id: &str, record: &WeightRecord) -> Result<()> {
        self.with_conn(|conn| insert_weight_record(conn, animal_id, record))
    }
}

fn insert_animal(conn: &Connection, animal: &Animal) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO animals (id, name, birth_date, breed, target_daily_gain_kg)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            animal.id,
            animal.name,
            animal.birth_date.format(DATE_FORMAT).to_string(),
            animal.breed,
            animal.target_daily_gain_kg,
        ],
    )?;
    for record in &animal.weights {
        insert_weight_record(conn, &animal.id, record)?;
    }
    Ok(())
}

fn insert_weight_record(conn: &Connection, animal_id: &str, record: &WeightRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO weights (animal_id, date, kg) VALUES (?1, ?2, ?3)",
        params![
            animal_id,
            record.date.format(DATE_FORMAT).to_string(),
            record.kg,
        ],
    )?;
    Ok(())
}

fn load_weights(conn: &Connection, animal_id: &str) -> Result<Vec<WeightRecord>> {
    let mut stmt =
        conn.prepare("SELECT date, kg FROM weights WHERE animal_id = ?1 ORDER BY id")?;
    let records = stmt
        .query_map([animal_id], |row| {
            let date_str: String = row.get("date")?;
            Ok(WeightRecord {
                date: parse_stored_date(&date_str)?,
                kg: row.get("kg")?,
            })
        })?
        .collect::<rusqlite::Result<Vec<WeightRecord>>>()?;
    Ok(records)
}

fn row_to_animal(row: &Row) -> rusqlite::Result<Animal> {
    let birth_date_str: String = row.get("birth_date")?;

    Ok(Animal {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: parse_stored_date(&birth_date_str)?,
        breed: row.get("breed")?,
        target_daily_gain_kg: row.get("target_daily_gain_kg")?,
        weights: Vec::new(),
    })
}

/// Stored dates are ISO `YYYY-MM-DD`. Anything else is corrupt and surfaces
/// as a conversion failure rather than being silently patched over.
fn parse_stored_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_animal() -> Animal {
        Animal::new("A-1", "Bella", date(2024, 3, 1), "SRB", 0.8)
    }

    #[test]
    fn create_and_reload_round_trip() {
        let db = Database::open_in_memory().unwrap();
        db.create_animal(&sample_animal()).unwrap();
        db.insert_weight("A-1", &WeightRecord::new(date(2025, 1, 1), 210.0))
            .unwrap();
        db.insert_weight("A-1", &WeightRecord::new(date(2025, 1, 31), 234.0))
            .unwrap();

        let herd = db.load_herd().unwrap();
        assert_eq!(herd.len(), 1);

        let animal = &herd.animals[0];
        assert_eq!(animal.id, "A-1");
        assert_eq!(animal.name, "Bella");
        assert_eq!(animal.birth_date, date(2024, 3, 1));
        assert_eq!(animal.breed, "SRB");
        assert_eq!(animal.target_daily_gain_kg, 0.8);
        assert_eq!(animal.weights.len(), 2);
        assert_eq!(animal.weights[1].kg, 234.0);
    }

    #[test]
    fn weights_keep_logging_order_on_equal_dates() {
        let db = Database::open_in_memory().unwrap();
        db.create_animal(&sample_animal()).unwrap();
        db.insert_weight("A-1", &WeightRecord::new(date(2025, 1, 1), 210.0))
            .unwrap();
        db.insert_weight("A-1", &WeightRecord::new(date(2025, 1, 1), 212.0))
            .unwrap();

        let animal = db.get_animal("A-1").unwrap().unwrap();
        assert_eq!(animal.weights[0].kg, 210.0);
        assert_eq!(animal.weights[1].kg, 212.0);
    }

    #[test]
    fn get_animal_missing() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_animal("A-404").unwrap().is_none());
        assert!(!db.animal_exists("A-404").unwrap());
    }

    #[test]
    fn duplicate_id_rejected_by_schema() {
        let db = Database::open_in_memory().unwrap();
        db.create_animal(&sample_animal()).unwrap();
        assert!(db.create_animal(&sample_animal()).is_err());
    }

    #[test]
    fn delete_cascades_to_weight_log() {
        let db = Database::open_in_memory().unwrap();
        db.create_animal(&sample_animal()).unwrap();
        db.insert_weight("A-1", &WeightRecord::new(date(2025, 1, 1), 210.0))
            .unwrap();

        db.delete_animal("A-1").unwrap();
        assert!(db.get_animal("A-1").unwrap().is_none());

        let orphans: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM weights", [], |row| row.get(0))
                    .map_err(Into::into)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn replace_herd_swaps_dataset() {
        let db = Database::open_in_memory().unwrap();
        db.create_animal(&sample_animal()).unwrap();

        let mut incoming = Animal::new("B-7", "Stella", date(2024, 6, 1), "Holstein", 0.9);
        incoming
            .weights
            .push(WeightRecord::new(date(2025, 2, 1), 180.0));
        let herd = Herd {
            animals: vec![incoming],
        };

        db.replace_herd(&herd).unwrap();

        let reloaded = db.load_herd().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.animals[0].id, "B-7");
        assert_eq!(reloaded.animals[0].weights.len(), 1);
    }
}
