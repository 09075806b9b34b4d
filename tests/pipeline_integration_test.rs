use anyhow::Result;
use sector_flows::domain::model::{FlowType, ViewKind};
use sector_flows::{FlowConfig, FlowEngine, FlowPipeline, LocalStorage};
use tempfile::TempDir;

const SECTOR: &str = "Manufacture of food products";

struct Fixture {
    _dir: TempDir,
    root: String,
}

impl Fixture {
    fn path(&self, name: &str) -> String {
        format!("{}/{}", self.root, name)
    }

    fn config(&self) -> FlowConfig {
        FlowConfig::new(
            &self.path("exports.csv"),
            &self.path("imports.csv"),
            &self.path("sut_io.csv"),
            &self.path("output"),
        )
        .with_sector(SECTOR)
    }
}

async fn write_fixture() -> Result<Fixture> {
    let dir = TempDir::new()?;
    let root = dir.path().to_str().unwrap().replace('\\', "/");

    let mut exports = String::from("CC_DESC_EN,COMM_NAME_EN,2022,2023\n");
    for i in 0..18 {
        exports.push_str(&format!(
            "{},\"Food commodity {}, prepared or preserved\",0,{}\n",
            SECTOR,
            i,
            (18 - i) * 2_500_000
        ));
    }
    exports.push_str("Manufacture of beverages,Bottled water,0,9000000\n");
    exports.push_str(&format!("{},Unreported,0,n/a\n", SECTOR));
    tokio::fs::write(format!("{}/exports.csv", root), exports).await?;

    let imports = format!(
        "CC_DESC_EN,COMM_NAME_EN,2022,2023\n{SECTOR},Wheat,0,40000000\n{SECTOR},Barley,0,15000000\nManufacture of beverages,Concentrate,0,2000000\n"
    );
    tokio::fs::write(format!("{}/imports.csv", root), imports).await?;

    let io = "\"Input-Output Tables (IOTs) 2018 (Thousands of Saudi riyals) - Economic Activities (ISIC Rev. 4)\",Total Intermediate Consumption,Final consumption expenditures\n\
\"10 - Manufacture of food products\",250000,750000\n\
\"11 - Manufacture of beverages\",20000,30000\n";
    tokio::fs::write(format!("{}/sut_io.csv", root), io).await?;

    Ok(Fixture { _dir: dir, root })
}

async fn run(config: FlowConfig) -> Result<serde_json::Value> {
    let pipeline = FlowPipeline::new(LocalStorage::new(".".to_string()), config);
    let engine = FlowEngine::new(pipeline);
    let output_path = engine.run().await?;
    let bytes = tokio::fs::read(&output_path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_end_to_end_all_views() -> Result<()> {
    let fixture = write_fixture().await?;
    let report = run(fixture.config()).await?;

    assert_eq!(report["sector_id"], SECTOR);
    assert_eq!(report["period"], "2023");

    let aggregate = &report["aggregate"];
    assert_eq!(aggregate["total_output"], 1_000_000_000.0);
    assert_eq!(aggregate["total_intermediate"], 250_000_000.0);
    // 無法解析的出口值以 0 計，其餘 18 項照常加總
    assert_eq!(aggregate["total_exports"], 427_500_000.0);
    assert_eq!(aggregate["total_imports"], 55_000_000.0);

    let overview = &report["overview"];
    assert_eq!(overview["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(overview["nodes"][0]["label"], "Sales\nSR 1.00B\n(100.0%)");

    let expanded = &report["expanded"];
    let nodes = expanded["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 12);
    assert_eq!(nodes[0]["value"], aggregate["total_exports"]);
    assert_eq!(overview["nodes"][1]["value"], aggregate["total_exports"]);
    assert!(nodes[11]["label"]
        .as_str()
        .unwrap()
        .starts_with("Other Exports\n"));

    let grid = &report["grid"];
    assert_eq!(grid["title"], "Remaining 9 Exports Items");
    assert_eq!(grid["rows"].as_array().unwrap().len(), 3);

    let catalog = report["catalog"].as_array().unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0]["sector_id"], SECTOR);
    assert_eq!(catalog[0]["category"], "Food");

    assert_eq!(report["import_chart"]["bars"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_imports_expanded() -> Result<()> {
    let fixture = write_fixture().await?;
    let config = fixture
        .config()
        .with_view(ViewKind::Expanded)
        .with_flow_type(FlowType::Imports);
    let report = run(config).await?;

    let expanded = &report["expanded"];
    assert_eq!(expanded["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(expanded["links"][0]["color"], "rgba(96, 165, 250, 0.7)");
    assert!(report["grid"].is_null());
    assert!(report["overview"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_catalog_only() -> Result<()> {
    let fixture = write_fixture().await?;
    let mut config = fixture.config().with_view(ViewKind::Catalog);
    config.sector = None;
    config.featured_sectors = Some(vec!["Manufacture of beverages".to_string()]);

    let report = run(config).await?;
    let catalog = report["catalog"].as_array().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0]["consumer_sales"], 30_000_000.0);

    let expected = format!("{}/catalog_report.json", fixture.path("output"));
    assert!(std::path::Path::new(&expected).exists());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_missing_table_fails() -> Result<()> {
    let fixture = write_fixture().await?;
    let mut config = fixture.config();
    config.io_path = fixture.path("missing.csv");

    let pipeline = FlowPipeline::new(LocalStorage::new(".".to_string()), config);
    let result = FlowEngine::new(pipeline).run().await;
    assert!(result.is_err());
    Ok(())
}
