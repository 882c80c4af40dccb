//! Execution service keyed on product identifier

use std::collections::HashMap;
use std::rc::Rc;

use bus::{Listener, ListenerSet, Service, SharedService};
use tracing::debug;
use types::execution::{ExecutionOrder, Venue};
use types::ids::ProductId;

use crate::algo::AlgoExecutionOrder;

/// Executes orders on a venue and distributes them downstream.
pub struct ExecutionService {
    orders: HashMap<ProductId, ExecutionOrder>,
    listeners: ListenerSet<ExecutionOrder>,
}

impl ExecutionService {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    /// Execute an order on a venue: store it and fan out once.
    pub fn execute_order(&mut self, order: &ExecutionOrder, venue: Venue) {
        debug!(order_id = %order.order_id, %venue, "executing order");
        self.orders
            .insert(order.product.product_id.clone(), order.clone());
        self.listeners.notify_add(order);
    }

    /// Listener adapter unwrapping algo orders from upstream.
    pub fn algo_listener(service: SharedService<Self>) -> Rc<dyn Listener<AlgoExecutionOrder>> {
        struct AlgoListener {
            service: SharedService<ExecutionService>,
        }

        impl Listener<AlgoExecutionOrder> for AlgoListener {
            fn process_add(&self, data: &AlgoExecutionOrder) {
                let mut service = self.service.borrow_mut();
                service.on_message(data.order.clone());
                service.execute_order(&data.order, data.venue);
            }
        }

        Rc::new(AlgoListener { service })
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for ExecutionService {
    type Key = ProductId;
    type Value = ExecutionOrder;

    fn get_data(&self, key: &ProductId) -> Option<&ExecutionOrder> {
        self.orders.get(key)
    }

    /// Store only; `execute_order` performs the single fan-out.
    fn on_message(&mut self, data: ExecutionOrder) {
        self.orders.insert(data.product.product_id.clone(), data);
    }

    fn add_listener(&mut self, listener: Rc<dyn Listener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }

    fn listeners(&self) -> &ListenerSet<ExecutionOrder> {
        &self.listeners
    }
}
