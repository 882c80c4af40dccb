//! Risk service
//!
//! Re-risks every position change into a PV01 figure using a per-product
//! sensitivity table, and rolls risk up across bucketed sectors.

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use types::ids::ProductId;
use types::position::Position;
use types::product::Bond;
use types::risk::{BucketedSector, Pv01};

/// Per-product PV01 lookup, injectable for tests.
pub type Pv01Table = Box<dyn Fn(&ProductId) -> Decimal>;

/// Per-unit-face PV01 sensitivities for the treasury catalog.
pub fn default_pv01_table() -> Pv01Table {
    Box::new(|product_id| match product_id.as_str() {
        "91282CFX4" => dec!(0.000185), // 2Y
        "91282CFW6" => dec!(0.000272), // 3Y
        "91282CFZ9" => dec!(0.000446), // 5Y
        "91282CFY2" => dec!(0.000606), // 7Y
        "91282CFV8" => dec!(0.000793), // 10Y
        "912810TM0" => dec!(0.001390), // 20Y
        "912810TL2" => dec!(0.001868), // 30Y
        _ => Decimal::ZERO,
    })
}

/// Vends risk per security and across bucketed sectors, keyed on product
/// identifier.
pub struct RiskService {
    pv01s: HashMap<ProductId, Pv01<Bond>>,
    listeners: ListenerSet<Pv01<Bond>>,
    pv01_table: Pv01Table,
}

impl RiskService {
    pub fn new() -> Self {
        Self::with_table(default_pv01_table())
    }

    pub fn with_table(pv01_table: Pv01Table) -> Self {
        Self {
            pv01s: HashMap::new(),
            listeners: ListenerSet::new(),
            pv01_table,
        }
    }

    /// Re-risk a position: look up the product sensitivity, attach the
    /// aggregate quantity, store, and fan out.
    pub fn add_position(&mut self, position: &Position) {
        let product_id = position.product.product_id.clone();
        let pv01_value = (self.pv01_table)(&product_id);
        let pv01 = Pv01::new(
            position.product.clone(),
            pv01_value,
            position.aggregate_position(),
        );

        debug!(product = %product_id, quantity = pv01.quantity, "risk updated");
        self.pv01s.insert(product_id, pv01.clone());
        self.listeners.notify_add(&pv01);
    }

    /// Risk for a bucketed sector: the sum of pv01 × quantity over the
    /// sector's products. Quantity 1 marks the roll-up as an aggregate, not
    /// a holding.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> Pv01<BucketedSector> {
        let total: Decimal = sector
            .products
            .iter()
            .filter_map(|product| self.pv01s.get(&product.product_id))
            .map(Pv01::total_risk)
            .sum();

        Pv01::new(sector.clone(), total, 1)
    }

    /// Listener adapter fed by the position service.
    pub fn position_listener(service: SharedService<Self>) -> Rc<dyn Listener<Position>> {
        struct PositionListener {
            service: SharedService<RiskService>,
        }

        impl Listener<Position> for PositionListener {
            fn process_add(&self, position: &Position) {
                self.service.borrow_mut().add_position(position);
            }
        }

        Rc::new(PositionListener { service })
    }
}

impl Default for RiskService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for RiskService {
    type Key = ProductId;
    type Value = Pv01<Bond>;

    fn get_data(&self, key: &ProductId) -> Option<&Pv01<Bond>> {
        self.pv01s.get(key)
    }

    /// Store only; `add_position` performs the fan-out.
    fn on_message(&mut self, pv01: Pv01<Bond>) {
        self.pv01s.insert(pv01.product.product_id.clone(), pv01);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<Pv01<Bond>>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<Pv01<Bond>> {
        &self.listeners
    }
}
