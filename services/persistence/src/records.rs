//! Persistable record kinds and their line formats

use types::execution::ExecutionOrder;
use types::inquiry::Inquiry;
use types::notation::format_price;
use types::position::Position;
use types::product::Bond;
use types::risk::Pv01;
use types::stream::{PriceStream, PriceStreamOrder};
use types::trade::Book;

/// The five persisted artifact kinds, each with a fixed output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Position,
    Risk,
    Execution,
    Streaming,
    Inquiry,
}

impl SinkKind {
    /// Fixed output filename for this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            SinkKind::Position => "positions.txt",
            SinkKind::Risk => "risk.txt",
            SinkKind::Execution => "executions.txt",
            SinkKind::Streaming => "streaming.txt",
            SinkKind::Inquiry => "allinquiries.txt",
        }
    }
}

/// A record the historical sinks know how to persist.
pub trait HistoricalRecord {
    /// Key the record is stored under.
    fn persist_key(&self) -> String;

    /// Ordered fields of the output line (the timestamp is added by the
    /// connector).
    fn to_fields(&self) -> Vec<String>;
}

impl HistoricalRecord for Position {
    fn persist_key(&self) -> String {
        self.product.product_id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![self.product.product_id.to_string()];
        for book in Book::ALL {
            fields.push(book.to_string());
            fields.push(self.position(book).to_string());
        }
        fields.push(self.aggregate_position().to_string());
        fields
    }
}

impl HistoricalRecord for Pv01<Bond> {
    fn persist_key(&self) -> String {
        self.product.product_id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.product.product_id.to_string(),
            self.pv01.to_string(),
            self.quantity.to_string(),
        ]
    }
}

impl HistoricalRecord for ExecutionOrder {
    fn persist_key(&self) -> String {
        self.product.product_id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.product.product_id.to_string(),
            self.side.to_string(),
            self.order_id.to_string(),
            self.order_type.to_string(),
            format_price(self.price),
            self.visible_quantity.to_string(),
            self.hidden_quantity.to_string(),
            self.parent_order_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            if self.is_child_order { "YES" } else { "NO" }.to_string(),
        ]
    }
}

fn stream_order_fields(order: &PriceStreamOrder, fields: &mut Vec<String>) {
    fields.push(format_price(order.price));
    fields.push(order.visible_quantity.to_string());
    fields.push(order.hidden_quantity.to_string());
    fields.push(order.side.to_string());
}

impl HistoricalRecord for PriceStream {
    fn persist_key(&self) -> String {
        self.product.product_id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![self.product.product_id.to_string()];
        stream_order_fields(&self.bid_order, &mut fields);
        stream_order_fields(&self.offer_order, &mut fields);
        fields
    }
}

impl HistoricalRecord for Inquiry {
    fn persist_key(&self) -> String {
        self.inquiry_id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.inquiry_id.to_string(),
            self.product.product_id.to_string(),
            self.side.to_string(),
            self.quantity.to_string(),
            format_price(self.price),
            self.state.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use types::execution::OrderType;
    use types::ids::{InquiryId, OrderId};
    use types::inquiry::InquiryState;
    use types::price::PricingSide;
    use types::product::bond_by_maturity;
    use types::trade::TradeSide;

    #[test]
    fn test_sink_file_names() {
        assert_eq!(SinkKind::Position.file_name(), "positions.txt");
        assert_eq!(SinkKind::Risk.file_name(), "risk.txt");
        assert_eq!(SinkKind::Execution.file_name(), "executions.txt");
        assert_eq!(SinkKind::Streaming.file_name(), "streaming.txt");
        assert_eq!(SinkKind::Inquiry.file_name(), "allinquiries.txt");
    }

    #[test]
    fn test_position_fields_cover_all_books() {
        let mut position = Position::new(bond_by_maturity(2).unwrap());
        position.add_position(Book::Trsy1, 1_250_000, TradeSide::Buy);
        position.add_position(Book::Trsy2, 500_000, TradeSide::Sell);

        let fields = position.to_fields();
        assert_eq!(
            fields,
            vec![
                "91282CFX4", "TRSY1", "1250000", "TRSY2", "-500000", "TRSY3", "0", "750000",
            ]
        );
    }

    #[test]
    fn test_execution_order_fields() {
        let order = ExecutionOrder::new(
            bond_by_maturity(10).unwrap(),
            PricingSide::Bid,
            OrderId::new("XO0000001"),
            OrderType::Market,
            dec!(99.984375),
            1_000_000,
            0,
            None,
            false,
        );
        assert_eq!(
            order.to_fields(),
            vec![
                "91282CFV8", "BID", "XO0000001", "MARKET", "99-31+", "1000000", "0", "", "NO",
            ]
        );
    }

    #[test]
    fn test_inquiry_fields() {
        let inquiry = Inquiry::new(
            InquiryId::new("INQ01"),
            bond_by_maturity(2).unwrap(),
            TradeSide::Buy,
            1_000_000,
            dec!(100),
            InquiryState::Done,
        );
        assert_eq!(
            inquiry.to_fields(),
            vec!["INQ01", "91282CFX4", "BUY", "1000000", "100-000", "DONE"]
        );
        assert_eq!(inquiry.persist_key(), "INQ01");
    }
}
