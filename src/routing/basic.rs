
/*!

Implementation of the routings for the Cartesian topologies.

* DimensionOrder
* AdaptiveMinimal

*/

use ::rand::rngs::StdRng;

use crate::error::{Error,SourceLocation};
use crate::router::OccupancyMap;
use crate::routing::{node_port,node_router,Routing};
use crate::topology::Topology;
use crate::{error,source_location,Flit};

/**
Advance along the first dimension with pending hops, draining X before Y.

The direction on each dimension comes from the topology's routing record: the plain coordinate difference on the mesh (the classical XY routing, deadlock-free by dimension order) and the minimal wrap-around difference on the torus, ties advancing forward.
**/
#[derive(Debug)]
pub struct DimensionOrder
{
}

impl Routing for DimensionOrder
{
	fn next(&self, flit:&Flit, topology:&dyn Topology, current_router:usize, _occupancy:&OccupancyMap, _rng:&mut StdRng) -> Result<usize,Error>
	{
		let destination=flit.packet.destination;
		let target_router=node_router(topology,destination);
		if current_router==target_router
		{
			return node_port(topology,current_router,destination)
				.ok_or_else(||error!(route_not_found,current_router,destination));
		}
		let cartesian_data=topology.cartesian_data().expect("DimensionOrder routing requires a Cartesian topology");
		let coord_current=cartesian_data.unpack(current_router);
		let coord_target=cartesian_data.unpack(target_router);
		let routing_record=topology.coordinated_routing_record(&coord_current,&coord_target);
		for (dimension,delta) in routing_record.iter().enumerate()
		{
			if *delta>0
			{
				return Ok(2*dimension+1);
			}
			if *delta<0
			{
				return Ok(2*dimension);
			}
		}
		Err(error!(route_not_found,current_router,destination))
	}
}

impl DimensionOrder
{
	pub fn new() -> DimensionOrder
	{
		DimensionOrder{
		}
	}
}

/**
Among the ports that reduce the distance to the destination on some dimension, select the one whose downstream buffer is emptiest.

Exact fullness ties resolve to the smaller port number, so the decision is deterministic given the same occupancy snapshot. At the destination router there is no productive port and the flit is ejected through the node port.
**/
#[derive(Debug)]
pub struct AdaptiveMinimal
{
}

impl Routing for AdaptiveMinimal
{
	fn next(&self, flit:&Flit, topology:&dyn Topology, current_router:usize, occupancy:&OccupancyMap, _rng:&mut StdRng) -> Result<usize,Error>
	{
		let destination=flit.packet.destination;
		let target_router=node_router(topology,destination);
		let cartesian_data=topology.cartesian_data().expect("AdaptiveMinimal routing requires a Cartesian topology");
		let coord_current=cartesian_data.unpack(current_router);
		let coord_target=cartesian_data.unpack(target_router);
		let routing_record=topology.coordinated_routing_record(&coord_current,&coord_target);
		let mut best:Option<(usize,f64)>=None;
		for (dimension,delta) in routing_record.iter().enumerate()
		{
			if *delta==0
			{
				continue;
			}
			let port=if *delta>0 { 2*dimension+1 } else { 2*dimension };
			let fullness=occupancy.fullness(current_router,port);
			let better=match best
			{
				None => true,
				Some((_,best_fullness)) => fullness<best_fullness,
			};
			if better
			{
				best=Some((port,fullness));
			}
		}
		if let Some((port,_))=best
		{
			return Ok(port);
		}
		//No productive port: we are at the destination router.
		node_port(topology,current_router,destination)
			.ok_or_else(||error!(route_not_found,current_router,destination))
	}
}

impl AdaptiveMinimal
{
	pub fn new() -> AdaptiveMinimal
	{
		AdaptiveMinimal{
		}
	}
}
