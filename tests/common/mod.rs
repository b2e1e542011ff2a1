use gridnoc::config::ConfigurationValue;

/*
	Auxiliary functions to create the configuration values for the tests.
*/

///Parameters of a synthetic-traffic configuration.
pub struct SyntheticConfigBuilder
{
	pub num_gpus: usize,
	pub topology: &'static str,
	pub num_virtual_channels: usize,
	pub routing_algo: &'static str,
	pub traffic_pattern: &'static str,
	pub injection_rate: f64,
	pub simulation_cycles: u64,
	pub random_seed: u64,
}

///Creates a `Configuration` object driving synthetic traffic.
pub fn create_synthetic_config(arg:SyntheticConfigBuilder) -> ConfigurationValue
{
	ConfigurationValue::Object("Configuration".to_string(),vec![
		("num_gpus".to_string(),ConfigurationValue::Number(arg.num_gpus as f64)),
		("topology".to_string(),ConfigurationValue::Literal(arg.topology.to_string())),
		("num_virtual_channels".to_string(),ConfigurationValue::Number(arg.num_virtual_channels as f64)),
		("routing_algo".to_string(),ConfigurationValue::Literal(arg.routing_algo.to_string())),
		("traffic_pattern".to_string(),ConfigurationValue::Literal(arg.traffic_pattern.to_string())),
		("injection_rate".to_string(),ConfigurationValue::Number(arg.injection_rate)),
		("simulation_cycles".to_string(),ConfigurationValue::Number(arg.simulation_cycles as f64)),
		("random_seed".to_string(),ConfigurationValue::Number(arg.random_seed as f64)),
	])
}

///Parameters of a ring all-reduce configuration.
pub struct AllReduceConfigBuilder
{
	pub num_gpus: usize,
	pub topology: &'static str,
	pub fat_tree_k: usize,
	pub num_virtual_channels: usize,
	pub data_size: usize,
	pub chunk_size_flits: usize,
	pub simulation_timeout_cycles: u64,
	pub random_seed: u64,
}

///Creates a `Configuration` object driving the ring all-reduce workload.
pub fn create_all_reduce_config(arg:AllReduceConfigBuilder) -> ConfigurationValue
{
	ConfigurationValue::Object("Configuration".to_string(),vec![
		("num_gpus".to_string(),ConfigurationValue::Number(arg.num_gpus as f64)),
		("topology".to_string(),ConfigurationValue::Literal(arg.topology.to_string())),
		("fat_tree_k".to_string(),ConfigurationValue::Number(arg.fat_tree_k as f64)),
		("num_virtual_channels".to_string(),ConfigurationValue::Number(arg.num_virtual_channels as f64)),
		("routing_algo".to_string(),ConfigurationValue::Literal("deterministic".to_string())),
		("traffic_pattern".to_string(),ConfigurationValue::Literal("all_reduce".to_string())),
		("injection_rate".to_string(),ConfigurationValue::Number(0.0)),
		("workload".to_string(),ConfigurationValue::Object("Workload".to_string(),vec![
			("all_reduce_data_size".to_string(),ConfigurationValue::Number(arg.data_size as f64)),
			("all_reduce_chunk_size_flits".to_string(),ConfigurationValue::Number(arg.chunk_size_flits as f64)),
		])),
		("simulation_timeout_cycles".to_string(),ConfigurationValue::Number(arg.simulation_timeout_cycles as f64)),
		("random_seed".to_string(),ConfigurationValue::Number(arg.random_seed as f64)),
	])
}

///Appends an entry to a `Configuration` object.
pub fn with_entry(cv:ConfigurationValue, key:&str, value:ConfigurationValue) -> ConfigurationValue
{
	match cv
	{
		ConfigurationValue::Object(name,mut pairs) =>
		{
			pairs.push((key.to_string(),value));
			ConfigurationValue::Object(name,pairs)
		},
		_ => panic!("only Configuration objects can be extended"),
	}
}

///Reads a numeric field out of a `Result` object.
pub fn result_number(results:&ConfigurationValue, field:&str) -> f64
{
	if let ConfigurationValue::Object(ref name,ref pairs)=results
	{
		assert_eq!(name,"Result");
		for (key,value) in pairs.iter()
		{
			if key==field
			{
				return value.as_f64().unwrap_or_else(|_|panic!("the field {} is not numeric",field));
			}
		}
	}
	panic!("no field {} in the results",field);
}

///Captures the crate logs while testing.
pub fn init_logging()
{
	let _=env_logger::builder().is_test(true).try_init();
}
