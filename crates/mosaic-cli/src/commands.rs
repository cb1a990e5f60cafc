use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use mosaic_export::{ExportQueue, ExportSettings, SessionCaches, load_settings, save_settings};
use mosaic_io::{find_pairs, loadcases};
use mosaic_model::{
    DisplacementField, LoadCase, MomentField, MosaicScene, Plate, ResultSelection, Rsn,
};
use rayon::prelude::*;
use serde::Serialize;

pub type CommandResult = Result<ExitCode, Box<dyn Error>>;

const NO_PAIRS: &str = "no pairs found";
const NO_DATA: &str = "no data in table";

pub fn scan(folder: &Path) -> CommandResult {
    let plates = find_pairs(folder)?;
    if plates.is_empty() {
        println!("{NO_PAIRS}");
        return Ok(ExitCode::SUCCESS);
    }

    for plate in &plates {
        println!("{}", describe_plate(plate));
    }

    let cases = loadcases::read_folder(folder)?;
    if cases.is_empty() {
        println!("load cases: none");
    } else {
        println!("load cases:");
        for case in &cases {
            println!("  {}", case.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn scene(
    folder: &Path,
    plate_key: &str,
    lc: Option<LoadCase>,
    rsn: Option<Rsn>,
    field: Option<&str>,
    json: bool,
    elements: bool,
) -> CommandResult {
    let plate = find_plate(folder, plate_key)?;
    let selection = selection(lc, rsn, field)?;

    let caches = SessionCaches::new();
    match caches.scene(&plate, &selection)? {
        None => println!("{NO_DATA}"),
        Some(scene) if json => println!("{}", serde_json::to_string_pretty(&scene)?),
        Some(scene) => print!("{}", describe_scene(&scene, elements)),
    }
    Ok(ExitCode::SUCCESS)
}

pub fn summary(folder: &Path, field: &str) -> CommandResult {
    let field: MomentField = field.parse()?;
    let plates = find_pairs(folder)?;
    if plates.is_empty() {
        println!("{NO_PAIRS}");
        return Ok(ExitCode::SUCCESS);
    }

    let caches = SessionCaches::new();
    for line in summary_lines(&caches, &plates, field) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct QueueDocument<'a> {
    created: String,
    settings: &'a ExportSettings,
    sheets: &'a ExportQueue,
}

pub fn queue(
    folder: &Path,
    plate_key: &str,
    field: &str,
    settings_path: Option<&Path>,
    out: Option<&Path>,
) -> CommandResult {
    let field: MomentField = field.parse()?;
    let plate = find_plate(folder, plate_key)?;

    let cases = loadcases::read_folder(folder)?;
    if cases.is_empty() {
        eprintln!("load-case list is empty (loadcases.csv not found or empty)");
        return Ok(ExitCode::from(2));
    }

    let settings = match settings_path {
        Some(path) => load_settings(path)?.normalized(),
        None => ExportSettings::default(),
    };

    let caches = SessionCaches::new();
    let moments = caches.moments(&plate)?;
    let mut queue = ExportQueue::new();
    let added = queue.add_all_load_cases(&plate, &cases, field, &moments, settings.show_mesh);
    log::info!("{added} sheet(s) queued for {}", plate.key);

    let document = QueueDocument {
        created: chrono::Local::now().to_rfc3339(),
        settings: &settings,
        sheets: &queue,
    };
    let json = serde_json::to_string_pretty(&document)?;

    match out {
        Some(path) => {
            fs::write(path, json)?;
            print!("{}", describe_queue(&queue, settings.first_sheet()));
            println!("{added} sheet(s) written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

pub fn settings(write: Option<&Path>) -> CommandResult {
    let settings = ExportSettings::default();
    match write {
        Some(path) => {
            save_settings(path, &settings)?;
            println!("settings written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&settings)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn find_plate(folder: &Path, key: &str) -> Result<Plate, Box<dyn Error>> {
    let wanted = key.to_lowercase();
    find_pairs(folder)?
        .into_iter()
        .find(|plate| plate.cache_key() == wanted)
        .ok_or_else(|| format!("plate '{key}' not found in {}", folder.display()).into())
}

fn selection(
    lc: Option<LoadCase>,
    rsn: Option<Rsn>,
    field: Option<&str>,
) -> Result<ResultSelection, Box<dyn Error>> {
    match (lc, rsn) {
        (Some(lc), _) => Ok(ResultSelection::Moments {
            lc,
            field: field.map(str::parse::<MomentField>).transpose()?.unwrap_or_default(),
        }),
        (None, Some(rsn)) => Ok(ResultSelection::Displacements {
            rsn,
            field: field
                .map(str::parse::<DisplacementField>)
                .transpose()?
                .unwrap_or_default(),
        }),
        (None, None) => Err("either --lc or --rsn is required".into()),
    }
}

fn join_ids(ids: impl Iterator<Item = i32>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

fn describe_plate(plate: &Plate) -> String {
    let geometry = plate
        .geometry_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{}  geometry={}  LC=[{}]  RSN=[{}]",
        plate.key,
        geometry,
        join_ids(plate.available_lcs()),
        join_ids(plate.available_rsns())
    )
}

fn describe_scene(scene: &MosaicScene, elements: bool) -> String {
    let mut out = String::new();
    let b = &scene.bounds;
    let legend = &scene.legend;
    let _ = writeln!(out, "{} | {}", scene.title_left, scene.title_right);
    let _ = writeln!(out, "elements: {}", scene.rendered_element_count());
    let _ = writeln!(
        out,
        "bounds: x [{:.3}, {:.3}]  y [{:.3}, {:.3}]",
        b.min_x, b.max_x, b.min_y, b.max_y
    );
    let _ = writeln!(out, "legend: {:.4} .. {:.4}", legend.min, legend.max);
    for i in 0..legend.bin_count {
        let Some((lo, hi)) = legend.bin_range(i) else {
            continue;
        };
        let color = legend.colors.get(i).map(ToString::to_string).unwrap_or_default();
        let percent = legend.percent_text.get(i).map(String::as_str).unwrap_or("");
        let _ = writeln!(out, "  {:>2}  [{lo:.4}, {hi:.4}]  {color}  {percent}", i + 1);
    }
    if elements {
        for el in &scene.elements {
            let (Some(bin), Some(color)) = (scene.bin_of(el.id()), scene.color_of(el.id())) else {
                continue;
            };
            let _ = writeln!(out, "element {}: bin {} {color}", el.id(), bin + 1);
        }
    }
    out
}

fn summary_lines(caches: &SessionCaches, plates: &[Plate], field: MomentField) -> Vec<String> {
    let jobs: Vec<(&Plate, Option<LoadCase>)> = plates
        .iter()
        .flat_map(|plate| {
            let lcs: Vec<Option<LoadCase>> = plate.available_lcs().map(Some).collect();
            if lcs.is_empty() {
                vec![(plate, None)]
            } else {
                lcs.into_iter().map(|lc| (plate, lc)).collect()
            }
        })
        .collect();

    jobs.par_iter()
        .map(|&(plate, lc)| {
            let Some(lc) = lc else {
                return format!("{}  no moments", plate.key);
            };
            let selection = ResultSelection::Moments { lc, field };
            match caches.scene(plate, &selection) {
                Ok(Some(scene)) => format!(
                    "{}  LC={lc}  {field}  elements={}  range=[{:.4}, {:.4}]",
                    plate.key,
                    scene.rendered_element_count(),
                    scene.legend.min,
                    scene.legend.max
                ),
                Ok(None) => format!("{}  LC={lc}  {field}  {NO_DATA}", plate.key),
                Err(err) => {
                    log::warn!("skipping unreadable {}: {err}", err.path().display());
                    format!("{}  LC={lc}  error: {err}", plate.key)
                }
            }
        })
        .collect()
}

fn describe_queue(queue: &ExportQueue, first_sheet: u32) -> String {
    let mut out = String::new();
    for (sheet, item) in (first_sheet..).zip(queue.items()) {
        let flag = if item.is_no_data() { "  [no data]" } else { "" };
        let _ = writeln!(out, "{sheet:>3}. {}{flag}", item.display_line());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOM: &str = "\
Element;Type;NodesCount;a;b;c;d;Node1;X1;Y1;Z1;Node2;X2;Y2;Z2;Node3;X3;Y3;Z3;Node4;X4;Y4;Z4
1;44;4;;;;;1;0;0;0;2;2;0;0;3;2;1;0;4;0;1;0
";

    fn folder() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();
        fs::write(root.join("geom_Z=1.csv"), GEOM).expect("write");
        fs::write(
            root.join("moments_Z=1_LC=1.csv"),
            "Element;CS;LC;Shape;History;Mx;My;Mxy\n1;0;1;;;1;2;3\n",
        )
        .expect("write");
        fs::write(root.join("moments_Z=1_LC=3.csv"), "Element;CS;LC;Shape;History;Mx;My;Mxy\n")
            .expect("write");
        fs::write(root.join("geom_empty.csv"), GEOM).expect("write");
        dir
    }

    #[test]
    fn plate_lookup_ignores_case() {
        let dir = folder();
        let plate = find_plate(dir.path(), "z=1").expect("plate found");
        assert_eq!(plate.key, "Z=1");
        assert_eq!(describe_plate(&plate), "Z=1  geometry=geom_Z=1.csv  LC=[1,3]  RSN=[]");

        let err = find_plate(dir.path(), "Z=2").expect_err("unknown plate");
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn selection_requires_a_result_and_known_field() {
        assert!(selection(None, None, None).is_err());
        assert!(selection(Some(1), None, Some("Mz")).is_err());
        assert_eq!(
            selection(None, Some(2), None).expect("selection"),
            ResultSelection::Displacements {
                rsn: 2,
                field: DisplacementField::Uz
            }
        );
        assert_eq!(
            selection(Some(4), None, Some("mxy")).expect("selection"),
            ResultSelection::Moments {
                lc: 4,
                field: MomentField::Mxy
            }
        );
    }

    #[test]
    fn summary_reports_each_plate_and_load_case() {
        let dir = folder();
        let plates = find_pairs(dir.path()).expect("scan");
        let lines = summary_lines(&SessionCaches::new(), &plates, MomentField::Mxy);
        assert_eq!(
            lines,
            vec![
                "empty  no moments".to_string(),
                "Z=1  LC=1  Mxy  elements=1  range=[3.0000, 4.0000]".to_string(),
                "Z=1  LC=3  Mxy  no data in table".to_string(),
            ]
        );
    }

    #[test]
    fn unreadable_tables_are_reported_per_line() {
        let dir = folder();
        // a directory where a moments file is expected cannot be read
        fs::create_dir(dir.path().join("moments_Z=1_LC=9.csv")).expect("mkdir");
        let plates = find_pairs(dir.path()).expect("scan");
        let lines = summary_lines(&SessionCaches::new(), &plates, MomentField::My);
        assert!(
            lines.iter().any(|l| l.starts_with("Z=1  LC=") && l.contains("error:")),
            "{lines:?}"
        );
    }

    #[test]
    fn scene_description_lists_every_bin() {
        let dir = folder();
        let plate = find_plate(dir.path(), "Z=1").expect("plate");
        let scene = SessionCaches::new()
            .scene(&plate, &ResultSelection::Moments { lc: 1, field: MomentField::My })
            .expect("read")
            .expect("scene");
        let text = describe_scene(&scene, false);
        assert!(text.starts_with("Z=1 | Mosaic of My | LC=1\n"));
        assert!(text.contains("bounds: x [0.000, 2.000]  y [0.000, 1.000]"));
        assert_eq!(text.lines().count(), 4 + scene.legend.bin_count);
        assert!(text.contains("100%"));

        let with_elements = describe_scene(&scene, true);
        let color = scene.color_of(1).expect("element 1 is binned");
        assert!(with_elements.ends_with(&format!("element 1: bin {} {color}\n", scene.bin_of(1).expect("bin") + 1)));
    }
}
