//! Menu loop.
//!
//! Every domain or storage error is printed as `Error: <message>` and the loop
//! carries on. Only terminal I/O failures end the session early; end of input
//! ends it cleanly.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{Inventory, StorageError};
use stockroom_products::{Product, ProductKind};

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Input(String),

    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

type CommandResult<T = ()> = Result<T, CommandError>;

const MAIN_MENU: &str = "\nMenu:
1. Add Product
2. Sell Product
3. Restock Product
4. Remove Product
5. Search/View Products
6. Save Inventory
7. Load Inventory
8. Remove Expired Groceries
9. Exit";

const ADD_MENU: &str = "\nAdd Product:
1. Electronics
2. Grocery
3. Clothing
4. Back to Main Menu";

const VIEW_MENU: &str = "\nSearch/View Options:
1. Search by Name
2. View All Products
3. View Electronics
4. View Groceries
5. View Clothing
6. View Inventory Value
7. Back to Main Menu";

/// Interactive shell over one inventory.
pub struct Shell<R, W> {
    inventory: Inventory,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(inventory: Inventory, input: R, output: W) -> Self {
        Self {
            inventory,
            input,
            output,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    /// Run until the user exits or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Inventory Management System")?;
        writeln!(self.output, "--------------------------")?;

        loop {
            writeln!(self.output, "{MAIN_MENU}")?;
            let outcome = self
                .prompt("Enter your choice (1-9): ")
                .and_then(|choice| self.dispatch(choice.trim()));

            match outcome {
                Ok(true) => continue,
                Ok(false) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                Err(CommandError::Eof) => break,
                Err(CommandError::Io(err)) => return Err(err),
                Err(err) => {
                    tracing::debug!(error = %err, "command failed");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }

        self.output.flush()
    }

    /// Returns `false` when the user asked to exit.
    fn dispatch(&mut self, choice: &str) -> CommandResult<bool> {
        match choice {
            "1" => self.add_product()?,
            "2" => self.sell_product()?,
            "3" => self.restock_product()?,
            "4" => self.remove_product()?,
            "5" => self.search_view()?,
            "6" => self.save_inventory()?,
            "7" => self.load_inventory()?,
            "8" => {
                let expired = self.inventory.remove_expired_products();
                writeln!(
                    self.output,
                    "Removed {} expired grocery items",
                    expired.len()
                )?;
            }
            "9" => return Ok(false),
            _ => writeln!(self.output, "Invalid choice. Please try again.")?,
        }
        Ok(true)
    }

    fn add_product(&mut self) -> CommandResult {
        writeln!(self.output, "{ADD_MENU}")?;
        let kind = match self.prompt("Enter product type (1-4): ")?.trim() {
            "1" => ProductKind::Electronics,
            "2" => ProductKind::Grocery,
            "3" => ProductKind::Clothing,
            "4" => return Ok(()),
            _ => {
                writeln!(self.output, "Invalid choice")?;
                return Ok(());
            }
        };

        let product_id = self.prompt("Enter product ID: ")?;
        let name = self.prompt("Enter product name: ")?;
        let price: f64 = self.prompt_parsed("Enter price: ", "price")?;
        let quantity: u64 = self.prompt_parsed("Enter initial stock quantity: ", "stock quantity")?;

        let product = match kind {
            ProductKind::Electronics => {
                let warranty: u32 = self.prompt_parsed("Enter warranty years: ", "warranty years")?;
                let brand = self.prompt("Enter brand: ")?;
                Product::electronics(product_id, name, price, quantity, warranty, brand)?
            }
            ProductKind::Grocery => {
                let expiry = self.prompt("Enter expiry date (YYYY-MM-DD): ")?;
                Product::grocery_from_str(product_id, name, price, quantity, expiry.trim())?
            }
            ProductKind::Clothing => {
                let size = self.prompt("Enter size: ")?;
                let material = self.prompt("Enter material: ")?;
                Product::clothing(product_id, name, price, quantity, size, material)?
            }
        };

        self.inventory.add_product(product)?;
        writeln!(self.output, "Product added successfully!")?;
        Ok(())
    }

    fn sell_product(&mut self) -> CommandResult {
        let product_id = self.prompt("Enter product ID to sell: ")?;
        let quantity: i64 = self.prompt_parsed("Enter quantity to sell: ", "quantity")?;

        self.inventory.sell_product(&product_id, quantity)?;
        writeln!(self.output, "Sale completed successfully!")?;
        Ok(())
    }

    fn restock_product(&mut self) -> CommandResult {
        let product_id = self.prompt("Enter product ID to restock: ")?;
        let quantity: i64 = self.prompt_parsed("Enter quantity to add: ", "quantity")?;

        self.inventory.restock_product(&product_id, quantity)?;
        writeln!(self.output, "Restock completed successfully!")?;
        Ok(())
    }

    fn remove_product(&mut self) -> CommandResult {
        let product_id = self.prompt("Enter product ID to remove: ")?;
        let removed = self.inventory.remove_product(&product_id)?;
        writeln!(self.output, "Removed: {removed}")?;
        Ok(())
    }

    fn search_view(&mut self) -> CommandResult {
        writeln!(self.output, "{VIEW_MENU}")?;
        let choice = self.prompt("Enter your choice (1-7): ")?;

        let products: Vec<&Product> = match choice.trim() {
            "1" => {
                let needle = self.prompt("Enter name to search: ")?;
                self.inventory.search_by_name(&needle)
            }
            "2" => self.inventory.list_all().iter().collect(),
            "3" => self.inventory.search_by_type(ProductKind::Electronics),
            "4" => self.inventory.search_by_type(ProductKind::Grocery),
            "5" => self.inventory.search_by_type(ProductKind::Clothing),
            "6" => {
                let value = self.inventory.total_value();
                writeln!(self.output, "\nTotal Inventory Value: ${value:.2}")?;
                return Ok(());
            }
            "7" => return Ok(()),
            _ => {
                writeln!(self.output, "Invalid choice")?;
                return Ok(());
            }
        };

        if products.is_empty() {
            writeln!(self.output, "No products found")?;
        } else {
            writeln!(self.output, "\nProducts:")?;
            for product in products {
                writeln!(self.output, "- {product}")?;
            }
        }
        Ok(())
    }

    fn save_inventory(&mut self) -> CommandResult {
        let path = self.prompt("Enter filename to save inventory: ")?;
        self.inventory.save_to_file(path.trim())?;
        writeln!(self.output, "Inventory saved successfully!")?;
        Ok(())
    }

    fn load_inventory(&mut self) -> CommandResult {
        let path = self.prompt("Enter filename to load inventory: ")?;
        self.inventory.load_from_file(path.trim())?;
        writeln!(self.output, "Inventory loaded successfully!")?;
        Ok(())
    }

    /// Print `label` and read one line without its line terminator.
    fn prompt(&mut self, label: &str) -> CommandResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CommandError::Eof);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_parsed<T: std::str::FromStr>(&mut self, label: &str, what: &str) -> CommandResult<T> {
        let raw = self.prompt(label)?;
        raw.trim()
            .parse()
            .map_err(|_| CommandError::Input(format!("invalid {what}: {:?}", raw.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn run_script(inventory: Inventory, script: &str) -> (Inventory, String) {
        let mut out = Vec::new();
        let mut shell = Shell::new(inventory, script.as_bytes(), &mut out);
        shell.run().unwrap();
        let inventory = shell.into_inventory();
        (inventory, String::from_utf8(out).unwrap())
    }

    #[test]
    fn adds_and_sells_a_product() {
        let script = "1\n1\nE-1\nLaptop\n999.99\n5\n2\nAcme\n2\nE-1\n2\n9\n";
        let (inventory, out) = run_script(Inventory::new(), script);

        assert!(out.contains("Product added successfully!"), "{out}");
        assert!(out.contains("Sale completed successfully!"), "{out}");
        assert!(out.contains("Exiting..."), "{out}");
        assert_eq!(inventory.get("E-1").unwrap().quantity_in_stock(), 3);
    }

    #[test]
    fn typed_expiry_date_is_trimmed_before_parsing() {
        let script = "1\n2\nG-1\nMilk\n1.5\n10\n  2030-05-01 \n9\n";
        let (inventory, out) = run_script(Inventory::new(), script);

        assert!(out.contains("Product added successfully!"), "{out}");
        let milk = inventory.get("G-1").unwrap();
        assert_eq!(
            milk.expiry_date(),
            chrono::NaiveDate::from_ymd_opt(2030, 5, 1)
        );
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let script = "2\nghost\n1\n1\n3\nC-1\nSocks\nfree\n9\n";
        let (inventory, out) = run_script(Inventory::new(), script);

        assert!(out.contains("Error: product ID ghost not found"), "{out}");
        assert!(out.contains("Error: invalid price: \"free\""), "{out}");
        assert!(out.contains("Exiting..."), "{out}");
        assert!(inventory.is_empty());
    }

    #[test]
    fn overselling_shows_available_and_requested() {
        let mut inventory = Inventory::new();
        inventory
            .add_product(Product::clothing("C-1", "Tee", 12.0, 2, "M", "Cotton").unwrap())
            .unwrap();

        let (inventory, out) = run_script(inventory, "2\nC-1\n5\n9\n");
        assert!(
            out.contains("Error: not enough stock. Available: 2, Requested: 5"),
            "{out}"
        );
        assert_eq!(inventory.get("C-1").unwrap().quantity_in_stock(), 2);
    }

    #[test]
    fn views_products_and_total_value() {
        let mut inventory = Inventory::new();
        inventory
            .add_product(Product::electronics("E-1", "Monitor", 100.0, 2, 1, "Acme").unwrap())
            .unwrap();
        inventory
            .add_product(Product::clothing("C-1", "Hoodie", 25.5, 4, "L", "Fleece").unwrap())
            .unwrap();

        let script = "5\n3\n5\n6\n5\n1\nzzz\n9\n";
        let (_, out) = run_script(inventory, script);

        assert!(out.contains("- Electronics - ID: E-1, Name: Monitor"), "{out}");
        assert!(!out.contains("- Clothing - ID: C-1"), "{out}");
        assert!(out.contains("Total Inventory Value: $302.00"), "{out}");
        assert!(out.contains("No products found"), "{out}");
    }

    #[test]
    fn prunes_expired_groceries() {
        let today = Local::now().date_naive();
        let mut inventory = Inventory::new();
        inventory
            .add_product(Product::grocery("G-1", "Bread", 2.0, 3, today - Duration::days(2)).unwrap())
            .unwrap();
        inventory
            .add_product(Product::grocery("G-2", "Rice", 4.0, 3, today + Duration::days(200)).unwrap())
            .unwrap();

        let (inventory, out) = run_script(inventory, "8\n9\n");
        assert!(out.contains("Removed 1 expired grocery items"), "{out}");
        assert_eq!(inventory.len(), 1);
        assert!(inventory.contains("G-2"));
    }

    #[test]
    fn save_and_load_through_the_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        let path = path.to_str().unwrap();

        let mut inventory = Inventory::new();
        inventory
            .add_product(Product::clothing("C-1", "Beanie", 9.5, 6, "One size", "Wool").unwrap())
            .unwrap();

        let script = format!("6\n{path}\n4\nC-1\n7\n{path}\n9\n");
        let (inventory, out) = run_script(inventory, &script);

        assert!(out.contains("Inventory saved successfully!"), "{out}");
        assert!(out.contains("Removed: Clothing - ID: C-1"), "{out}");
        assert!(out.contains("Inventory loaded successfully!"), "{out}");
        assert_eq!(inventory.get("C-1").unwrap().quantity_in_stock(), 6);
    }

    #[test]
    fn end_of_input_exits_quietly() {
        let (_, out) = run_script(Inventory::new(), "1\n2\nG-1\n");
        assert!(!out.contains("Error"), "{out}");
        assert!(!out.contains("Exiting..."), "{out}");
    }
}
