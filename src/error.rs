/*!

This module is for managing errors in the code of gridnoc. To avoid invoking `panic!` in favor of a more graceful exit. Cases that should never happen can be kept as `panic!`.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|e|Error::bad_argument(source_location!()).with_message(format!("{}",e)))?;`
* `ok_or_else` like in `.ok_or_else( ||Error::route_not_found(source_location!(),router,destination) )?;`

Instead of `panic!` try
* Return an error. E.g., by `return Err( Error::bad_argument(source_location!()) );`

The `error!` macro may easy up the writing a little. E.g., `error!(bad_argument)` or `error!(route_not_found,router,destination)`.

To include arbitrary messages use the `with_message` method, like as `Error::undetermined(source_location!()).with_message(format!("A text like in a panic: {}",thing_to_dump))`.

When displaying errors
* Write to the standard error instead of to the standard output. I.e., with `eprintln!` instead of `println!`.
* If you need to exit the application you may use `std::process::exit` instead of `panic!`.

*/

use std::fmt::{Display,Formatter};

use crate::config::ConfigurationValue;

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// A configuration value that could not be interpreted.
	IllFormedConfiguration{
		value: ConfigurationValue,
	},
	/// A routing function could not resolve an output port.
	/// Keep the router making the request and the destination node of the offending flit.
	RouteNotFound{
		router_index: usize,
		destination: usize,
	},
	/// Some method received a bad argument. There should be an attached message with further explanation.
	BadArgument,
	/// Any other error. Better to add new types than to use this thing.
	Undetermined,
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}
#[macro_export]
macro_rules! error{
	($kind:ident,$($args:tt)*) => {{
		Error::$kind( source_location!(), $($args)* )
	}};
	($kind:ident) => {{
		Error::$kind( source_location!() )
	}};
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		match self.message
		{
			Some(ref mut text) => *text += &message,
			None => self.message=Some(message),
		}
		self
	}
	pub fn ill_formed_configuration(source_location:SourceLocation,value:ConfigurationValue)->Error
	{
		Error{
			source_location,
			kind: IllFormedConfiguration{
				value,
			},
			message:None,
		}
	}
	/// example call: Error::route_not_found(source_location!(),router_index,destination).
	pub fn route_not_found(source_location:SourceLocation,router_index:usize,destination:usize)->Error
	{
		Error{
			source_location,
			kind: RouteNotFound{
				router_index,
				destination,
			},
			message:None,
		}
	}
	pub fn bad_argument(source_location:SourceLocation)->Error
	{
		Error{
			source_location,
			kind: BadArgument,
			message:None,
		}
	}
	pub fn undetermined(source_location:SourceLocation)->Error
	{
		Error{
			source_location,
			kind: Undetermined,
			message:None,
		}
	}
}


impl Display for Error
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		match self
		{
			IllFormedConfiguration{value} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: The following configuration value could not be interpreted:\n{}",value)?;
			},
			RouteNotFound{router_index,destination} =>
			{
				writeln!(formatter,"RouteNotFound error: router {} could not resolve an output port towards node {}.",router_index,destination)?;
			},
			BadArgument =>
			{
				writeln!(formatter,"BadArgument: Bad arguments given to a function.")?;
			},
			Undetermined =>
			{
				writeln!(formatter,"Undetermined error: A generic error. The concrete error should be more specified.")?;
			},
		}
		Ok(())
	}
}
