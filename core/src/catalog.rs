use serde::{Deserialize, Serialize};

/// Anything that can be rendered into a searchable document.
pub trait Searchable {
    fn to_searchable_text(&self) -> String;
}

/// One product row from the supply chain dataset.
///
/// Field aliases accept the dataset's original column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(alias = "SKU")]
    pub sku: String,
    #[serde(alias = "Product type", default)]
    pub product_type: String,
    #[serde(alias = "Price")]
    pub price: f64,
    #[serde(alias = "Stock levels")]
    pub stock_level: u32,
    #[serde(alias = "Number of products sold")]
    pub units_sold: u32,
    #[serde(alias = "Supplier name", default)]
    pub supplier: String,
    #[serde(alias = "Location", default)]
    pub location: String,
    #[serde(alias = "Lead time")]
    pub lead_time_days: u32,
    /// Percent of units found defective.
    #[serde(alias = "Defect rates")]
    pub defect_rate: f64,
    #[serde(alias = "Shipping times")]
    pub shipping_time_days: u32,
    #[serde(alias = "Transportation modes", default)]
    pub transport_mode: String,
    #[serde(alias = "Routes", default)]
    pub route: String,
}

impl InventoryItem {
    /// Average units sold per day over a 30-day month.
    pub fn daily_demand(&self) -> f64 {
        self.units_sold as f64 / 30.0
    }
}

impl Searchable for InventoryItem {
    fn to_searchable_text(&self) -> String {
        format!(
            "Product {}: {} at ${:.2}\n\
             Stock: {} units | Sales: {} units\n\
             Supplier: {} ({})\n\
             Lead Time: {} days | Defect Rate: {:.2}%\n\
             Shipping: {} via {}",
            self.sku,
            self.product_type,
            self.price,
            self.stock_level,
            self.units_sold,
            self.supplier,
            self.location,
            self.lead_time_days,
            self.defect_rate,
            self.transport_mode,
            self.route,
        )
    }
}

const INVENTORY_POLICY: &str = "INVENTORY MANAGEMENT POLICY

Safety Stock Requirements:
- Class A items (high value): 2 weeks average demand + 30% buffer
- Class B items (medium value): 10 days average demand + 20% buffer
- Class C items (low value): 5 days average demand + 10% buffer

Reorder Point Formula:
ROP = (Average Daily Demand × Lead Time) + Safety Stock

Stock Alert Levels:
- RED ALERT (<20% safety stock): Emergency reorder required
- YELLOW WARNING (20-50%): Expedite next order
- GREEN STATUS (>50%): Normal operations";

const SUPPLIER_STANDARDS: &str = "SUPPLIER PERFORMANCE STANDARDS

Lead Time Requirements by Category:
- Haircare products: 10-15 days acceptable
- Skincare products: 12-18 days acceptable
- Cosmetics: 15-20 days acceptable

Penalty Structure for Delays:
- 1-5 days late: 2% invoice reduction
- 6-10 days late: 5% invoice reduction
- >10 days late: 10% reduction + performance review

Quality Standards:
- Tier 1 Suppliers: <2% defect rate required
- Tier 2 Suppliers: <3% defect rate required
- Tier 3 Suppliers: <5% defect rate required";

const RISK_FRAMEWORK: &str = "RISK MANAGEMENT FRAMEWORK

Risk Assessment Criteria:
- Stock Risk: Inventory < 10 units = HIGH risk
- Quality Risk: Defect rate > 5% = HIGH risk
- Supplier Risk: Lead time > 20 days = MEDIUM risk
- Logistics Risk: Shipping delay > 10 days = MEDIUM risk

Required Actions by Risk Level:
- HIGH: Immediate action required within 24 hours
- MEDIUM: Review within 1 week
- LOW: Monitor during regular reviews";

/// Built-in policy documents used when no policy directory is given.
pub fn default_policies() -> Vec<String> {
    [INVENTORY_POLICY, SUPPLIER_STANDARDS, RISK_FRAMEWORK]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(sku: &str) -> InventoryItem {
        InventoryItem {
            sku: sku.to_string(),
            product_type: "haircare".into(),
            price: 69.808,
            stock_level: 58,
            units_sold: 802,
            supplier: "Supplier 3".into(),
            location: "Mumbai".into(),
            lead_time_days: 7,
            defect_rate: 0.226,
            shipping_time_days: 4,
            transport_mode: "Road".into(),
            route: "Route B".into(),
        }
    }

    #[test]
    fn renders_item_document() {
        let text = item("SKU0").to_searchable_text();
        assert_eq!(
            text,
            "Product SKU0: haircare at $69.81\n\
             Stock: 58 units | Sales: 802 units\n\
             Supplier: Supplier 3 (Mumbai)\n\
             Lead Time: 7 days | Defect Rate: 0.23%\n\
             Shipping: Road via Route B"
        );
    }

    #[test]
    fn accepts_dataset_headers() {
        let row = r#"{
            "SKU": "SKU1", "Product type": "skincare", "Price": 14.84,
            "Stock levels": 53, "Number of products sold": 736,
            "Supplier name": "Supplier 3", "Location": "Kolkata",
            "Lead time": 30, "Defect rates": 4.85, "Shipping times": 2,
            "Transportation modes": "Road", "Routes": "Route B"
        }"#;
        let parsed: InventoryItem = serde_json::from_str(row).unwrap();
        assert_eq!(parsed.sku, "SKU1");
        assert_eq!(parsed.lead_time_days, 30);
        assert!((parsed.daily_demand() - 736.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn three_builtin_policies() {
        let policies = default_policies();
        assert_eq!(policies.len(), 3);
        assert!(policies[0].starts_with("INVENTORY MANAGEMENT POLICY"));
    }
}
