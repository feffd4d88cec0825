//! # Interactive Shell
//!
//! A line-oriented front end over [`Session`]. Each input line is one user
//! action; the next line is read only after the action (and any request it
//! makes) has finished. Banners are printed once after the action that raised
//! them and then dismissed.
//!
//! Input and output are generic so tests can drive a whole session from a
//! string.

use super::render::{banners, render_draft, render_messages, render_product, render_state};
use prodtrac::api::CmdMessage;
use prodtrac::draft::DraftField;
use prodtrac::error::Result;
use prodtrac::session::Session;
use prodtrac::store::ProductStore;
use prodtrac::view::SortField;
use std::io::{BufRead, Write};

const PROMPT: &str = "prodtrac> ";

const HELP: &str = "\
Commands:
  list                  Show the current listing
  refresh               Fetch the product list again
  search <text>         Filter by id, name or description (empty clears)
  sort <field>          Sort by id, name, description, price or quantity;
                        repeating the field flips the direction
  show <id>             Show one product
  new                   Start a blank product form
  edit <id>             Load a product into the form
  set <field> <value>   Fill a form field
  form                  Show the form
  submit                Create or update from the form
  cancel                Clear the form
  delete <id>           Delete a product
  help                  Show this help
  quit                  Leave the shell
";

pub struct ShellOptions {
    pub use_color: bool,
    pub confirm_delete: bool,
}

/// Asks a yes/no question. Anything but `y`/`yes` (including end of input)
/// counts as no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn run_shell<S, R, W>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
    options: &ShellOptions,
) -> Result<()>
where
    S: ProductStore,
    R: BufRead,
    W: Write,
{
    session.refresh();
    write!(output, "{}", render_state(session.state(), options.use_color))?;
    flush_banners(session, output, options)?;

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => write!(output, "{}", HELP)?,
            "list" | "ls" => write!(output, "{}", render_state(session.state(), options.use_color))?,
            "refresh" | "r" => {
                session.refresh();
                write!(output, "{}", render_state(session.state(), options.use_color))?;
            }
            "search" | "filter" | "/" => {
                session.set_filter(rest);
                write!(output, "{}", render_state(session.state(), options.use_color))?;
            }
            "sort" => match rest.parse::<SortField>() {
                Ok(field) => {
                    session.sort_by(field);
                    write!(output, "{}", render_state(session.state(), options.use_color))?;
                }
                Err(e) => print_error(output, &e, options)?,
            },
            "show" => match parse_id(rest) {
                Ok(id) => match session.state().find(id) {
                    Some(product) => write!(output, "{}", render_product(product, options.use_color))?,
                    None => print_error(output, &format!("Product not found: {}", id), options)?,
                },
                Err(e) => print_error(output, &e, options)?,
            },
            "new" | "add" => {
                session.cancel();
                write!(output, "{}", render_draft(&session.state().draft, options.use_color))?;
            }
            "edit" => match parse_id(rest) {
                Ok(id) => {
                    if session.edit(id) {
                        write!(output, "{}", render_draft(&session.state().draft, options.use_color))?;
                    }
                }
                Err(e) => print_error(output, &e, options)?,
            },
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match field.parse::<DraftField>() {
                    Ok(field) => {
                        session.set_field(field, value.trim());
                        write!(output, "{}", render_draft(&session.state().draft, options.use_color))?;
                    }
                    Err(e) => print_error(output, &e, options)?,
                }
            }
            "form" => write!(output, "{}", render_draft(&session.state().draft, options.use_color))?,
            "cancel" => {
                session.cancel();
                write!(
                    output,
                    "{}",
                    render_messages(&[CmdMessage::info("Form cleared")], options.use_color)
                )?;
            }
            "submit" | "save" => {
                if session.submit() {
                    write!(output, "{}", render_state(session.state(), options.use_color))?;
                }
            }
            "delete" | "rm" => match parse_id(rest) {
                Ok(id) => {
                    let prompt = format!("Delete product {}?", id);
                    if options.confirm_delete && !confirm(&prompt, input, output)? {
                        write!(
                            output,
                            "{}",
                            render_messages(&[CmdMessage::info("Aborted")], options.use_color)
                        )?;
                    } else if session.delete(id) {
                        write!(output, "{}", render_state(session.state(), options.use_color))?;
                    }
                }
                Err(e) => print_error(output, &e, options)?,
            },
            other => print_error(
                output,
                &format!("Unknown command: {} (type help)", other),
                options,
            )?,
        }

        flush_banners(session, output, options)?;
    }

    Ok(())
}

fn flush_banners<S: ProductStore, W: Write>(
    session: &mut Session<S>,
    output: &mut W,
    options: &ShellOptions,
) -> Result<()> {
    let messages = banners(session.state());
    if !messages.is_empty() {
        write!(output, "{}", render_messages(&messages, options.use_color))?;
        session.dismiss();
    }
    Ok(())
}

fn print_error<W: Write>(output: &mut W, message: &str, options: &ShellOptions) -> Result<()> {
    write!(
        output,
        "{}",
        render_messages(&[CmdMessage::error(message)], options.use_color)
    )?;
    Ok(())
}

fn parse_id(arg: &str) -> std::result::Result<i64, String> {
    if arg.is_empty() {
        return Err("Missing product id".to_string());
    }
    arg.parse()
        .map_err(|_| format!("Invalid product id: {}", arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodtrac::api::ProdtracApi;
    use prodtrac::model::Product;
    use prodtrac::store::memory::InMemoryStore;
    use std::io::Cursor;

    fn store() -> InMemoryStore {
        InMemoryStore::with_products(vec![
            Product::new(1, "Phone", "A smartphone", 699.99, 50),
            Product::new(2, "Laptop", "A powerful laptop", 999.99, 30),
            Product::new(3, "Pen", "A blue ink pen", 1.99, 100),
        ])
    }

    fn run(store: InMemoryStore, script: &str, confirm_delete: bool) -> (Session<InMemoryStore>, String) {
        let mut session = Session::new(ProdtracApi::new(store, std::env::temp_dir()));
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let options = ShellOptions {
            use_color: false,
            confirm_delete,
        };
        run_shell(&mut session, &mut input, &mut output, &options).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn shows_listing_on_start_and_quits() {
        let (_, out) = run(store(), "quit\n", true);
        assert!(out.starts_with("Total: 3\n"));
        assert!(out.contains("Laptop"));
        assert!(out.ends_with(PROMPT));
    }

    #[test]
    fn search_and_sort_reshape_listing() {
        let (session, out) = run(store(), "search PHONE\nsort price\nsort price\n", true);
        assert!(out.contains("Search: \"PHONE\""));
        assert!(out.contains("Price v"));
        assert_eq!(session.state().view.filter, "PHONE");
        let ids: Vec<i64> = session.rows().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn add_through_the_form() {
        let script = "new\nset id 7\nset name Lamp\nset description A desk lamp\nset price 45\nset quantity 2\nsubmit\n";
        let (session, out) = run(store(), script, true);
        assert!(out.contains("Product created successfully"));
        assert_eq!(session.state().products.len(), 4);
        assert_eq!(session.state().find(7).unwrap().description, "A desk lamp");
        // The banner was shown and then dismissed.
        assert_eq!(session.state().notice, None);
    }

    #[test]
    fn rejected_submit_prints_server_detail() {
        let mut store = store();
        store.reject_writes("name required");
        let script = "new\nset id 7\nset name Lamp\nset description d\nset price 1\nset quantity 1\nsubmit\n";
        let (session, out) = run(store, script, true);
        assert!(out.contains("> name required\n"));
        assert_eq!(session.state().products.len(), 3);
        assert_eq!(session.state().draft.name, "Lamp");
    }

    #[test]
    fn missing_field_is_reported_before_sending() {
        let (session, out) = run(store(), "new\nset id 7\nsubmit\n", true);
        assert!(out.contains("Name is required"));
        assert_eq!(session.api().store().len(), 3);
    }

    #[test]
    fn edit_locks_the_id() {
        let (session, out) = run(store(), "edit 3\nset id 9\nset price 2.5\nsubmit\n", true);
        assert!(out.contains("ID cannot be changed while editing"));
        assert!(out.contains("Product updated successfully"));
        assert_eq!(session.state().find(3).unwrap().price, Some(2.5));
        assert!(session.state().find(9).is_none());
    }

    #[test]
    fn delete_asks_first() {
        let (session, out) = run(store(), "delete 2\nn\ndelete 2\ny\n", true);
        assert!(out.contains("Delete product 2? [y/N] "));
        assert!(out.contains("Aborted"));
        assert!(out.contains("Product deleted successfully"));
        assert!(session.state().find(2).is_none());
    }

    #[test]
    fn delete_without_confirmation_when_disabled() {
        let (session, out) = run(store(), "rm 1\n", false);
        assert!(!out.contains("[y/N]"));
        assert!(session.state().find(1).is_none());
    }

    #[test]
    fn bad_input_keeps_the_session_alive() {
        let (session, out) = run(store(), "frobnicate\nsort colour\nshow x\nshow 42\nlist\n", true);
        assert!(out.contains("Unknown command: frobnicate"));
        assert!(out.contains("Unknown sort field: colour"));
        assert!(out.contains("Invalid product id: x"));
        assert!(out.contains("Product not found: 42"));
        assert_eq!(session.state().products.len(), 3);
    }

    #[test]
    fn confirm_treats_end_of_input_as_no() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(!confirm("Sure?", &mut input, &mut output).unwrap());

        let mut input = Cursor::new(b"YES\n".to_vec());
        assert!(confirm("Sure?", &mut input, &mut output).unwrap());
    }
}
