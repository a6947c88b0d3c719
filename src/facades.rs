//! Stock facades for common graph node shapes.
//!
//! These are ordinary [`graph_facade!`](crate::graph_facade) declarations;
//! nothing about them is special to the store.

use crate::graph_facade;

graph_facade! {
    /// Postal location of a place.
    pub struct GraphLocation {
        street, set_street: String;
        city, set_city: String;
        state, set_state: String;
        country, set_country: String;
        zip, set_zip: String;
        latitude, set_latitude: f64;
        longitude, set_longitude: f64;
    }
}

graph_facade! {
    /// A place node (page with a location).
    pub struct GraphPlace {
        id, set_id: String;
        name, set_name: String;
        category, set_category: String;
        location, set_location: GraphLocation;
    }
}

graph_facade! {
    /// A user node.
    pub struct GraphUser {
        id, set_id: String;
        name, set_name: String;
        first_name, set_first_name: String;
        middle_name, set_middle_name: String;
        last_name, set_last_name: String;
        link, set_link: String;
        username, set_username: String;
        birthday, set_birthday: String;
        /// Current city, itself a place.
        location, set_location: GraphPlace;
    }
}
