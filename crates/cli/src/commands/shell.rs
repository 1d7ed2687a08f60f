//! Interactive shopping session.
//!
//! The shell is the front end's event loop: it reads one command per line,
//! runs it to completion, then reads the next. All client-side state lives in
//! one [`Session`] owned by the [`Shell`]; product data is fetched on demand
//! and handed to the stores explicitly.
//!
//! Failures (unknown commands, missing products, network errors) are printed
//! and the loop carries on with the session intact.

use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use mini_store_core::{CollectionLabel, ProductId, Store};
use mini_store_storefront::{
    CheckoutForm, Pager, ProductFeed, ProductRepository, Session, checkout, filter_by_title,
};

use crate::error::CliError;
use crate::render;

const HELP: &str = "\
Browsing:
  list                      show the current page
  next | prev               move between pages
  more                      load the next page into the feed
  show <id>                 product details
  search <text>             filter products by title
Cart:
  add <id>                  add one unit to the cart
  remove <id>               remove a product from the cart
  inc <id> | dec <id>       change a cart quantity
  clear                     empty the cart
  cart                      show the cart and its total
  checkout <name> <email>   check out the cart
Wishlist:
  wish <id>, unwish <id>, winc <id>, wdec <id>, wclear, wishlist,
  wcheckout <name> <email>
Other:
  help                      this text
  quit                      leave the shell";

// =============================================================================
// Commands
// =============================================================================

/// Which store a store command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTarget {
    Cart,
    Wishlist,
}

/// Operations available on either store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    Add(ProductId),
    Remove(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Clear,
    Show,
    Checkout(CheckoutForm),
}

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Next,
    Prev,
    More,
    Show(ProductId),
    Search(String),
    Store(StoreTarget, StoreCommand),
    Help,
    Quit,
}

/// Errors parsing a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    UnknownCommand(String),

    #[error("`{command}` expects a product id")]
    MissingId {
        /// Command that was missing its argument.
        command: &'static str,
    },

    #[error("Invalid product id `{0}`")]
    InvalidId(String),
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use StoreCommand as S;
        use StoreTarget::{Cart, Wishlist};

        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "next" => Self::Next,
            "prev" => Self::Prev,
            "more" => Self::More,
            "show" => Self::Show(parse_id("show", rest)?),
            "search" => Self::Search(rest.to_string()),

            "add" => Self::Store(Cart, S::Add(parse_id("add", rest)?)),
            "remove" | "rm" => Self::Store(Cart, S::Remove(parse_id("remove", rest)?)),
            "inc" => Self::Store(Cart, S::Increase(parse_id("inc", rest)?)),
            "dec" => Self::Store(Cart, S::Decrease(parse_id("dec", rest)?)),
            "clear" => Self::Store(Cart, S::Clear),
            "cart" => Self::Store(Cart, S::Show),
            "checkout" => Self::Store(Cart, S::Checkout(parse_form(rest))),

            "wish" => Self::Store(Wishlist, S::Add(parse_id("wish", rest)?)),
            "unwish" => Self::Store(Wishlist, S::Remove(parse_id("unwish", rest)?)),
            "winc" => Self::Store(Wishlist, S::Increase(parse_id("winc", rest)?)),
            "wdec" => Self::Store(Wishlist, S::Decrease(parse_id("wdec", rest)?)),
            "wclear" => Self::Store(Wishlist, S::Clear),
            "wishlist" => Self::Store(Wishlist, S::Show),
            "wcheckout" => Self::Store(Wishlist, S::Checkout(parse_form(rest))),

            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<ProductId, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::MissingId { command });
    }
    arg.parse()
        .map_err(|_| ShellError::InvalidId(arg.to_string()))
}

/// `<name...> <email>`: the last word is the email, the rest is the name.
///
/// Missing parts are left blank for checkout validation to reject.
fn parse_form(arg: &str) -> CheckoutForm {
    arg.rsplit_once(char::is_whitespace).map_or_else(
        || CheckoutForm::new("", arg),
        |(name, email)| CheckoutForm::new(name.trim(), email),
    )
}

// =============================================================================
// Shell
// =============================================================================

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session over a product repository.
pub struct Shell<R> {
    repo: R,
    session: Session,
    pager: Pager,
    feed: ProductFeed,
    last_page_len: Option<usize>,
}

impl<R: ProductRepository> Shell<R> {
    /// Start a session with empty stores, browsing `page_size` products at a time.
    #[must_use]
    pub fn new(repo: R, page_size: u32) -> Self {
        Self {
            repo,
            session: Session::new(),
            pager: Pager::new(page_size),
            feed: ProductFeed::new(page_size),
            last_page_len: None,
        }
    }

    /// The session state (cart, wishlist, search query).
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Read and run commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures end the loop with an error; command failures are
    /// printed to `out`.
    pub async fn run<I, W>(&mut self, input: I, out: &mut W) -> Result<(), CliError>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        prompt(out)?;
        while let Some(raw) = lines.next_line().await? {
            let line = raw.trim();
            if !line.is_empty() {
                let result = match line.parse::<ShellCommand>() {
                    Ok(command) => self.execute(command, out).await,
                    Err(err) => Err(err.into()),
                };

                match result {
                    Ok(Flow::Quit) => return Ok(()),
                    Ok(Flow::Continue) => {}
                    Err(CliError::Io(err)) => return Err(err.into()),
                    Err(err) => report(&err, out)?,
                }
            }
            prompt(out)?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Run a single command.
    ///
    /// # Errors
    ///
    /// Returns repository, checkout and I/O failures.
    pub async fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        debug!(?command, "Executing shell command");

        match command {
            ShellCommand::List => self.show_page(out).await?,
            ShellCommand::Next => {
                let Some(len) = self.last_page_len else {
                    self.show_page(out).await?;
                    return Ok(Flow::Continue);
                };
                if !self.pager.next_page(len) {
                    writeln!(out, "You are on the last page.")?;
                } else if let Err(err) = self.show_page(out).await {
                    self.pager.previous_page();
                    return Err(err);
                }
            }
            ShellCommand::Prev => {
                if self.pager.previous_page() {
                    self.show_page(out).await?;
                } else {
                    writeln!(out, "You are on the first page.")?;
                }
            }
            ShellCommand::More => self.load_more(out).await?,
            ShellCommand::Show(id) => {
                let product = self.repo.get_product(id).await?;
                render::product_detail(out, &product)?;
            }
            ShellCommand::Search(query) => {
                self.session.search_mut().set_query(query);
                let products = self.repo.list_products().await?;
                let query = self.session.search().query();
                let matches = filter_by_title(&products, query);
                writeln!(out, "{} result(s) for \"{query}\"", matches.len())?;
                render::product_list(out, matches)?;
            }
            ShellCommand::Store(StoreTarget::Cart, command) => {
                apply(&self.repo, self.session.cart_mut(), command, out).await?;
            }
            ShellCommand::Store(StoreTarget::Wishlist, command) => {
                apply(&self.repo, self.session.wishlist_mut(), command, out).await?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn show_page<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        let products = self.pager.fetch(&self.repo).await?;
        self.last_page_len = Some(products.len());

        writeln!(out, "Page {}", self.pager.page())?;
        render::product_list(out, &products)?;
        Ok(())
    }

    async fn load_more<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        if !self.feed.has_more() {
            writeln!(out, "No more products.")?;
            return Ok(());
        }

        let loaded = self.feed.load_next(&self.repo).await?;
        let start = self.feed.products().len() - loaded;
        if loaded > 0 {
            render::product_list(out, self.feed.products().iter().skip(start))?;
        }
        if !self.feed.has_more() {
            writeln!(out, "End of catalog ({} products).", self.feed.products().len())?;
        }
        Ok(())
    }
}

/// Apply a store command to whichever store was selected.
async fn apply<R, L, W>(
    repo: &R,
    store: &mut Store<L>,
    command: StoreCommand,
    out: &mut W,
) -> Result<(), CliError>
where
    R: ProductRepository,
    L: CollectionLabel,
    W: Write,
{
    let label = store.label();

    match command {
        StoreCommand::Add(id) => {
            let product = repo.get_product(id).await?;
            let title = product.title.clone();
            store.add(product);
            let quantity = store.get(id).map_or(0, |item| item.quantity);
            writeln!(out, "Added \"{title}\" to your {label} (quantity {quantity}).")?;
        }
        StoreCommand::Remove(id) => {
            if store.get(id).is_some() {
                store.remove(id);
                writeln!(out, "Removed product {id} from your {label}.")?;
            } else {
                writeln!(out, "Product {id} is not in your {label}.")?;
            }
        }
        StoreCommand::Increase(id) => {
            store.increase_quantity(id);
            render::store(out, store)?;
        }
        StoreCommand::Decrease(id) => {
            store.decrease_quantity(id);
            render::store(out, store)?;
        }
        StoreCommand::Clear => {
            store.clear();
            writeln!(out, "Your {label} has been cleared.")?;
        }
        StoreCommand::Show => render::store(out, store)?,
        StoreCommand::Checkout(form) => {
            let confirmation = checkout(store, &form)?;
            render::confirmation(out, &confirmation)?;
        }
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn report<W: Write>(err: &CliError, out: &mut W) -> io::Result<()> {
    if err.is_server_error() {
        warn!(error = %err, "Command failed");
    } else {
        debug!(error = %err, "Command rejected");
    }
    writeln!(out, "error: {}", err.user_message())
}
