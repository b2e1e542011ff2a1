
/*!

A Routing selects the output port a head flit must leave a router through.

see [`new_routing`](fn.new_routing.html) for the predefined routings. The routing of a fabric is selected once at construction, from the `routing_algo` configuration entry and the family of the topology; routers never branch on configuration strings while simulating.

*/

/// Contains DimensionOrder, AdaptiveMinimal.
pub mod basic;
/// Contains UpDown, AdaptiveUpDown.
pub mod updown;

use std::fmt::Debug;

use ::rand::rngs::StdRng;

use self::basic::{AdaptiveMinimal,DimensionOrder};
use self::updown::{AdaptiveUpDown,UpDown};
use crate::error::Error;
use crate::router::OccupancyMap;
use crate::topology::{Location,Topology};
use crate::Flit;

///Information stored in the packet for the `Routing` algorithms and the statistics to operate.
#[derive(Debug,Default)]
pub struct RoutingInfo
{
	///Number of edges traversed (Router--Router). It is computed by the advance routine of the simulator.
	pub hops: usize,
}

/**
A routing algorithm to resolve the output port of the head flit at the front of an input buffer.

Deterministic routings depend only on the flit and the topology. Adaptive routings additionally read the `OccupancyMap` snapshot of the downstream buffers. Either way the same inputs must resolve to the same port, so that simulations are repeatable.
**/
pub trait Routing : Debug
{
	/// Compute the output port.
	/// `current_router` is the index of the router performing the request in the `topology`.
	/// `occupancy` is the pre-cycle snapshot of the downstream reception buffers.
	fn next(&self, flit:&Flit, topology:&dyn Topology, current_router:usize, occupancy:&OccupancyMap, rng:&mut StdRng) -> Result<usize,Error>;
}

///The argument of a builder function for routings.
#[derive(Debug)]
pub struct RoutingBuilderArgument<'a>
{
	///`"deterministic"` or `"adaptive"`.
	pub routing_algo: &'a str,
	///The topology the routing will serve.
	pub topology: &'a dyn Topology,
}

/**Build the routing of a fabric.

On the Cartesian topologies `"deterministic"` selects [DimensionOrder] and `"adaptive"` selects [AdaptiveMinimal]. On the fat-tree they select [UpDown] and [AdaptiveUpDown]. Unknown `routing_algo` values are fatal.
**/
pub fn new_routing(arg:RoutingBuilderArgument) -> Box<dyn Routing>
{
	let on_grid=arg.topology.cartesian_data().is_some();
	match (arg.routing_algo,on_grid)
	{
		("deterministic",true) => Box::new(DimensionOrder::new()),
		("adaptive",true) => Box::new(AdaptiveMinimal::new()),
		("deterministic",false) => Box::new(UpDown::new(arg.topology)),
		("adaptive",false) => Box::new(AdaptiveUpDown::new(arg.topology)),
		(other,_) => panic!("Unknown routing_algo {}",other),
	}
}

///The router of the topology to which the node is attached.
pub fn node_router(topology:&dyn Topology, node_index:usize) -> usize
{
	match topology.node_neighbour(node_index)
	{
		Location::RouterPort{router_index,router_port:_} => router_index,
		_ => panic!("The node is not attached to a router"),
	}
}

///The port of `router_index` attaching the node, for the final ejection hop.
pub fn node_port(topology:&dyn Topology, router_index:usize, node_index:usize) -> Option<usize>
{
	for port in 0..topology.ports(router_index)
	{
		if let Location::NodePort(node)=topology.neighbour(router_index,port)
		{
			if node==node_index
			{
				return Some(port);
			}
		}
	}
	None
}
