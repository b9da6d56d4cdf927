//! Reflowed planograms written to disk read back unchanged.

use std::fs;

use anyhow::Result;

use shelf_reflow::prelude::*;

#[test]
fn saved_store_round_trips() -> Result<()> {
    let (mut planogram, sales) = Fixture::from_set("store")?.into_parts();
    let mut affected = AffectedLayers::new();

    planogram.remove_trays(&mut affected);

    let report = reflow_all(&affected, &planogram, &sales, &ReflowSettings::default())?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("store_final.yml");

    save_planogram(&path, report.planogram())?;

    let written: Planogram = serde_norway::from_str(&fs::read_to_string(&path)?)?;

    assert_eq!(&written, report.planogram());
    assert!(
        written.items().iter().all(|item| !item.is_tray()),
        "no trays in the saved table"
    );

    Ok(())
}

#[test]
fn saved_table_loads_as_a_fixture() -> Result<()> {
    let (mut planogram, sales) = Fixture::from_set("store")?.into_parts();
    let mut affected = AffectedLayers::new();

    planogram.remove_trays(&mut affected);

    let report = reflow_all(&affected, &planogram, &sales, &ReflowSettings::default())?;

    let dir = tempfile::tempdir()?;

    save_planogram(
        &dir.path().join("planograms").join("final.yml"),
        report.planogram(),
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());

    fixture.load_planogram("final")?;

    assert_eq!(fixture.planogram().len(), report.planogram().len());

    Ok(())
}
