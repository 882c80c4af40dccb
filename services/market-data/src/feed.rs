//! Depth feed connector
//!
//! Reads `productId,price,quantity,side` rows and emits one `OrderBook` per
//! batch of `2 * book_depth` rows, preserving file order within each stack.
//! Accumulation buffers are cleared between books but keep their capacity,
//! since the next batch fills them to the same size.

use std::io::BufRead;

use bus::{Connector, Service, SharedService};
use tracing::{debug, warn};
use types::errors::{FeedError, RecordError};
use types::notation::parse_price;
use types::price::PricingSide;
use types::product::{bond_by_cusip, Bond};

use crate::book::{Order, OrderBook};
use crate::service::MarketDataService;

/// Subscribe-only connector feeding the market data service.
pub struct MarketDataFeed {
    service: SharedService<MarketDataService>,
}

struct DepthRecord {
    product: Bond,
    order: Order,
}

impl MarketDataFeed {
    pub fn new(service: SharedService<MarketDataService>) -> Self {
        Self { service }
    }

    fn parse_record(line: &str) -> Result<DepthRecord, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [product_id, price, quantity, side] = fields.as_slice() else {
            return Err(RecordError::Malformed(line.to_string()));
        };

        let product = bond_by_cusip(product_id)
            .ok_or_else(|| RecordError::UnknownProduct(product_id.to_string()))?;
        let price = parse_price(price)?;
        let quantity: i64 = quantity
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;
        let side: PricingSide = side
            .parse()
            .map_err(|_| RecordError::Malformed(line.to_string()))?;

        Ok(DepthRecord {
            product,
            order: Order::new(price, quantity, side),
        })
    }
}

impl Connector<OrderBook> for MarketDataFeed {
    fn subscribe<R: BufRead>(&mut self, input: R) -> Result<(), FeedError> {
        let batch_size = 2 * self.service.borrow().book_depth();

        let mut bid_stack: Vec<Order> = Vec::new();
        let mut offer_stack: Vec<Order> = Vec::new();
        let mut record_count = 0usize;
        let mut book_count = 0usize;

        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let record = match Self::parse_record(&line) {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "skipping depth record");
                    continue;
                }
            };

            match record.order.side {
                PricingSide::Bid => bid_stack.push(record.order),
                PricingSide::Offer => offer_stack.push(record.order),
            }

            record_count += 1;
            if record_count == batch_size {
                let book =
                    OrderBook::new(record.product, bid_stack.clone(), offer_stack.clone());
                self.service.borrow_mut().on_message(book);
                book_count += 1;

                // Clear without shrinking: the next batch fills the buffers
                // to the same size.
                bid_stack.clear();
                offer_stack.clear();
                record_count = 0;
            }
        }

        debug!(books = book_count, "depth feed drained");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bus::{shared, Listener};
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;
    use types::ids::ProductId;

    struct BookCounter {
        books: RefCell<Vec<OrderBook>>,
    }

    impl Listener<OrderBook> for BookCounter {
        fn process_add(&self, book: &OrderBook) {
            self.books.borrow_mut().push(book.clone());
        }
    }

    fn depth_lines(cusip: &str, books: usize, depth: usize) -> String {
        let mut out = String::new();
        for _ in 0..books {
            for level in 0..depth {
                out.push_str(&format!("{cusip},99-{:02}0,{},BID\n", 31 - level, (level + 1) * 1_000_000));
                out.push_str(&format!("{cusip},100-{:02}0,{},OFFER\n", level, (level + 1) * 1_000_000));
            }
        }
        out
    }

    fn run_feed(input: &str, depth: usize) -> (SharedService<MarketDataService>, Rc<BookCounter>) {
        let service = shared(MarketDataService::with_depth(depth));
        let counter = Rc::new(BookCounter {
            books: RefCell::new(Vec::new()),
        });
        service
            .borrow_mut()
            .add_listener(counter.clone() as Rc<dyn Listener<OrderBook>>);

        let mut feed = MarketDataFeed::new(service.clone());
        feed.subscribe(Cursor::new(input.to_string())).unwrap();
        (service, counter)
    }

    #[test]
    fn test_one_book_per_batch() {
        let input = depth_lines("91282CFX4", 3, 4);
        let (_, counter) = run_feed(&input, 4);

        let books = counter.books.borrow();
        assert_eq!(books.len(), 3);
        for book in books.iter() {
            assert_eq!(book.bid_stack().len(), 4);
            assert_eq!(book.offer_stack().len(), 4);
        }
    }

    #[test]
    fn test_incomplete_tail_batch_not_emitted() {
        let mut input = depth_lines("91282CFX4", 1, 4);
        input.push_str("91282CFX4,99-310,1000000,BID\n");
        let (_, counter) = run_feed(&input, 4);
        assert_eq!(counter.books.borrow().len(), 1);
    }

    #[test]
    fn test_book_preserves_file_order() {
        let input = depth_lines("91282CFX4", 1, 3);
        let (_, counter) = run_feed(&input, 3);

        let books = counter.books.borrow();
        let bids = books[0].bid_stack();
        assert_eq!(bids[0].price, dec!(99.96875)); // 99-310
        assert_eq!(bids[1].price, dec!(99.9375)); // 99-300
        assert_eq!(bids[2].price, dec!(99.90625)); // 99-290
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let mut input = String::from("garbage line\n91282CFX4,not-a-price,10,BID\n");
        input.push_str(&depth_lines("91282CFX4", 1, 2));
        let (_, counter) = run_feed(&input, 2);
        assert_eq!(counter.books.borrow().len(), 1);
    }

    #[test]
    fn test_unknown_product_skipped() {
        let mut input = String::from("000000000,99-310,1000000,BID\n");
        input.push_str(&depth_lines("91282CFX4", 1, 2));
        let (_, counter) = run_feed(&input, 2);

        let books = counter.books.borrow();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].product.product_id, ProductId::new("91282CFX4"));
    }

    #[test]
    fn test_store_holds_latest_book() {
        let input = depth_lines("91282CFX4", 2, 2);
        let (service, counter) = run_feed(&input, 2);

        let key = ProductId::new("91282CFX4");
        let service = service.borrow();
        let stored = service.get_data(&key).unwrap();
        assert_eq!(stored, counter.books.borrow().last().unwrap());
    }
}
