/*!

The configuration of a simulation is a tree of `ConfigurationValue`s. The external loader (YAML, a dashboard, a sweep driver) is a collaborator outside this crate; it is expected to build the tree and hand it to `Simulation::new`.

An `Object` is a named record `Name { key1 : value1, key2 : value2, [...] }`. Builders destructure their object with the [match_object_panic] macro, panicking on unknown fields. Malformed configuration is a fatal error at construction.

*/

use std::fmt::{Display,Formatter};

use crate::error::{Error,SourceLocation};
use crate::{error,source_location,Time};

///The value of a configuration entry. A configuration is a tree of these.
#[derive(Clone,Debug,PartialEq)]
pub enum ConfigurationValue
{
	///A double-quoted string.
	Literal(String),
	///Any number, stored as `f64`.
	Number(f64),
	///A named record `Name { key : value, ... }`.
	Object(String,Vec<(String,ConfigurationValue)>),
	///A list `[value, value, ...]`.
	Array(Vec<ConfigurationValue>),
	True,
	False,
}

impl Display for ConfigurationValue
{
	fn fmt(&self, formatter:&mut Formatter<'_>) -> Result<(),std::fmt::Error>
	{
		match self
		{
			ConfigurationValue::Literal(ref s) => write!(formatter,"\"{}\"",s),
			ConfigurationValue::Number(x) => write!(formatter,"{}",x),
			ConfigurationValue::Object(ref name,ref pairs) =>
			{
				write!(formatter,"{}{{",name)?;
				for (key,value) in pairs.iter()
				{
					write!(formatter," {}: {},",key,value)?;
				}
				write!(formatter,"}}")
			},
			ConfigurationValue::Array(ref list) =>
			{
				write!(formatter,"[")?;
				for value in list.iter()
				{
					write!(formatter,"{}, ",value)?;
				}
				write!(formatter,"]")
			},
			ConfigurationValue::True => write!(formatter,"true"),
			ConfigurationValue::False => write!(formatter,"false"),
		}
	}
}

/**
Destructure a `ConfigurationValue::Object` into its fields, panicking on anything unexpected.

```ignore
let mut sides=None;
match_object_panic!(cv,"Mesh",value,
	"sides" => sides=Some(value.as_usize().expect("bad value for sides")),
);
```
**/
#[macro_export]
macro_rules! match_object_panic{
	($cv:expr, $name:literal, $valueid:ident ) => {{
		match_object_panic!($cv,[$name],$valueid,)
	}};
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		match_object_panic!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				if $names.len()==1 {
					panic!("A {} must be created from a `{}` object not `{}`",$names[0],$names[0],cv_name);
				} else {
					panic!("Trying to create either of `{:?}` object from `{}`",$names,cv_name);
				}
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					_ => panic!("Nothing to do with field {} in {}",name,$names[0]),
				}
			}
		}
		else
		{
			panic!("Trying to create a {} from a non-Object",$names[0]);
		}
	}};
}

impl ConfigurationValue
{
	pub fn as_bool(&self) -> Result<bool,Error>
	{
		match self
		{
			&ConfigurationValue::True => Ok(true),
			&ConfigurationValue::False => Ok(false),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_str(&self) -> Result<&str,Error>
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => Ok(s),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_f64(&self) -> Result<f64,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>{
				let res =  x as usize;
				// Casting from a float to an integer will round the float towards zero
				// overflows and underflows will saturate
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance {
					Err(error!(ill_formed_configuration, self.clone()))
				} else {
					Ok( res )
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_time(&self) -> Result<Time,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>{
				let res =  x as Time;
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance {
					Err(error!(ill_formed_configuration, self.clone()))
				} else {
					Ok( res )
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_array(&self) -> Result<&Vec<ConfigurationValue>,Error>
	{
		match self
		{
			&ConfigurationValue::Array(ref x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	/// Build a generic IllFormedConfiguration error from this ConfigurationValue.
	pub fn ill(&self,message:&str) -> Error
	{
		error!(ill_formed_configuration,self.clone()).with_message(message.to_string())
	}
}
