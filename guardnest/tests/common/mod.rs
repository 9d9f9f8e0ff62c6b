pub mod mock_refresh_server;
