
/*!

A [Pattern] defines the way nodes select the destinations of their synthetic traffic.

see [`new_pattern`](fn.new_pattern.html) for the predefined patterns.

*/

use std::fmt::Debug;

use ::rand::{Rng,rngs::StdRng};
use log::warn;

use crate::topology::Topology;

///A `Pattern` describes how traffic sources decide destinations among the nodes.
pub trait Pattern : Debug
{
	///Fix the input and output size, providing the topology and random number generator.
	fn initialize(&mut self, source_size:usize, target_size:usize, topology:&dyn Topology, rng:&mut StdRng);
	///Obtain a destination of a source. This will be called once per generated packet.
	fn get_destination(&self, origin:usize, topology:&dyn Topology, rng:&mut StdRng) -> usize;
}

///The argument to a builder function of patterns.
#[derive(Debug)]
pub struct PatternBuilderArgument<'a>
{
	///The `traffic_pattern` name from the configuration.
	pub name: &'a str,
	///Destinations favoured by the hotspot pattern.
	pub hotspot_nodes: &'a [usize],
	///Probability of a hotspot destination.
	pub hotspot_rate: f64,
}

/**Build a new pattern.

* `"uniform_random"`: [UniformRandom], uniform among all nodes other than the origin.
* `"transpose"`: [Transpose], the grid coordinate swap, falling back to uniform when the swap is the origin itself or the topology has no coordinates.
* `"hotspot"`: [Hotspot], biased towards the configured hotspot nodes.

Unknown names are fatal. The `"all_reduce"` value selects the workload driver instead of a pattern and is resolved by the simulator, not here.
**/
pub fn new_pattern(arg:PatternBuilderArgument) -> Box<dyn Pattern>
{
	match arg.name
	{
		"uniform_random" => Box::new(UniformRandom::new()),
		"transpose" => Box::new(Transpose::new()),
		"hotspot" => Box::new(Hotspot::new(arg.hotspot_nodes.to_vec(),arg.hotspot_rate)),
		_ => panic!("Unknown traffic_pattern {}",arg.name),
	}
}

///Each destination request will be uniform random among all the range `0..size` minus the `origin`.
///Independently of past requests, decisions or origin.
#[derive(Debug)]
pub struct UniformRandom
{
	size: usize,
}

impl Pattern for UniformRandom
{
	fn initialize(&mut self, _source_size:usize, target_size:usize, _topology:&dyn Topology, _rng:&mut StdRng)
	{
		self.size=target_size;
	}
	fn get_destination(&self, origin:usize, _topology:&dyn Topology, rng:&mut StdRng) -> usize
	{
		// Act like the origin were swapped with the last element.
		let random_size=self.size-1;
		let r=rng.gen_range(0..random_size);
		if r==origin
		{
			random_size
		}
		else
		{
			r
		}
	}
}

impl UniformRandom
{
	pub(crate) fn new() -> UniformRandom
	{
		UniformRandom{
			size: 0,//to be initialized later
		}
	}
}

///Swap the grid coordinates of the origin: a node at `(x,y)` sends to the node at `(y,x)`.
///Nodes on the diagonal, and every node when the topology has no coordinates, fall back to uniform random.
#[derive(Debug)]
pub struct Transpose
{
	///Whether the topology has coordinates at all. A one-time warning is emitted otherwise.
	on_grid: bool,
	fallback: UniformRandom,
}

impl Pattern for Transpose
{
	fn initialize(&mut self, source_size:usize, target_size:usize, topology:&dyn Topology, rng:&mut StdRng)
	{
		self.on_grid=topology.cartesian_data().is_some();
		if !self.on_grid
		{
			warn!("the transpose pattern is only valid for grid topologies; falling back to uniform_random");
		}
		self.fallback.initialize(source_size,target_size,topology,rng);
	}
	fn get_destination(&self, origin:usize, topology:&dyn Topology, rng:&mut StdRng) -> usize
	{
		if self.on_grid
		{
			let cartesian_data=topology.cartesian_data().expect("the topology lost its coordinates");
			let mut coordinates=cartesian_data.unpack(origin);
			coordinates.reverse();
			let destination=cartesian_data.pack(&coordinates);
			if destination!=origin
			{
				return destination;
			}
		}
		self.fallback.get_destination(origin,topology,rng)
	}
}

impl Transpose
{
	pub(crate) fn new() -> Transpose
	{
		Transpose{
			on_grid: false,
			fallback: UniformRandom::new(),
		}
	}
}

///With probability `rate` draw the destination uniformly from the configured pool of hotspot nodes; otherwise, and always when the origin is itself a hotspot, behave as uniform random.
#[derive(Debug)]
pub struct Hotspot
{
	///The favoured destinations.
	destinations: Vec<usize>,
	///Probability of sending to a hotspot.
	rate: f64,
	fallback: UniformRandom,
}

impl Pattern for Hotspot
{
	fn initialize(&mut self, source_size:usize, target_size:usize, topology:&dyn Topology, rng:&mut StdRng)
	{
		for destination in self.destinations.iter()
		{
			if *destination>=target_size
			{
				panic!("hotspot node {} is outside the network",destination);
			}
		}
		self.fallback.initialize(source_size,target_size,topology,rng);
	}
	fn get_destination(&self, origin:usize, topology:&dyn Topology, rng:&mut StdRng) -> usize
	{
		if !self.destinations.is_empty() && rng.gen::<f64>()<self.rate && !self.destinations.contains(&origin)
		{
			let r=rng.gen_range(0..self.destinations.len());
			return self.destinations[r];
		}
		self.fallback.get_destination(origin,topology,rng)
	}
}

impl Hotspot
{
	pub(crate) fn new(destinations:Vec<usize>, rate:f64) -> Hotspot
	{
		Hotspot{
			destinations,
			rate,
			fallback: UniformRandom::new(),
		}
	}
}
