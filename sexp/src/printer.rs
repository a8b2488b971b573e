//! Print s-expressions as text.
//!
//! [`Print`] describes how a value is laid out in terms of atoms and lists,
//! while a [`Printer`] decides how those end up in the output. Two printers
//! are provided: a compact one used by [`Display`](std::fmt::Display), and a
//! width-aware pretty printer.
mod pretty;
mod simple;
pub use pretty::to_string_pretty;
pub use simple::to_string;

/// Trait for types that can print s-expressions.
pub trait Printer: Sized {
    type Error;

    /// Print an atom, quoting and escaping it where needed.
    fn atom(&mut self, atom: &str) -> Result<(), Self::Error>;

    /// Print a list given a function that prints the contents.
    fn list<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a printable value.
    fn print(&mut self, value: impl Print) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

impl<T: Print + ?Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (*self).print(printer)
    }
}

/// Prints the items one after the other, without surrounding delimiters.
impl<T: Print> Print for [T] {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        for item in self {
            printer.print(item)?;
        }
        Ok(())
    }
}

impl<T: Print> Print for Vec<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        self.as_slice().print(printer)
    }
}
