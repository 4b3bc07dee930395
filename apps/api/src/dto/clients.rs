use ohs_audit_domain::Client;
use serde::Serialize;

/// Flat client record; unset optional fields are empty strings.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: i64,
    pub name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.as_i64(),
            name: client.name,
            contact_name: client.contact_name.unwrap_or_default(),
            contact_email: client.contact_email.unwrap_or_default(),
            contact_phone: client.contact_phone.unwrap_or_default(),
            address: client.address.unwrap_or_default(),
        }
    }
}

/// Every client, ordered by name.
#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub clients: Vec<ClientResponse>,
}
