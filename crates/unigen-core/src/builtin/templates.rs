//! TypeScript skeletons for the built-in generators
//!
//! Placeholders are ordinary syntax (quoted import sources, `New*`
//! identifiers) so every skeleton parses before any slot is filled.

pub(super) const CLIENT_MANAGER: &str = "import { inject, injectable } from 'inversify';
import { ClientSideManager } from '{CLIENT_MANAGER_SPEC_PATH}';

import * as Events from '{INTERNAL_EVENTS_MODULE_PATH}';

@injectable()
export class NewManager extends ClientSideManager {
    constructor() {
        super();
    }
}
";

pub(super) const SERVER_MANAGER: &str = "import { inject, injectable } from 'inversify';
import { ServerSideManager } from '{SERVER_MANAGER_SPEC_PATH}';

import * as Events from '{INTERNAL_EVENTS_MODULE_PATH}';

@injectable()
export class NewManager extends ServerSideManager {
    constructor() {
        super();
    }
}
";

pub(super) const CLIENT_CONTROLLER: &str = "import * as Events from '{INTERNAL_EVENTS_MODULE_PATH}';
import * as ExternalEvents from '{EXTERNAL_EVENTS_MODULE_PATH}';

import * as ServerEvents from '{PEER_EXTERNAL_EVENTS_MODULE_PATH}';

import { inject, injectable } from 'inversify';
import { EventBusClient } from '{EVENT_BUS_SPEC_PATH}';
import { HandleExternalEvent } from '{EVENTS_SPEC_PATH}';
import { ClientSideController } from '{CONTROLLER_SPEC_PATH}';

@injectable()
export class NewController extends ClientSideController {
    constructor(@inject(EventBusClient) eventBus: EventBusClient) {
        super(eventBus);
    }
}
";

pub(super) const SERVER_CONTROLLER: &str = "import * as Events from '{INTERNAL_EVENTS_MODULE_PATH}';
import * as ExternalEvents from '{EXTERNAL_EVENTS_MODULE_PATH}';

import * as ClientEvents from '{PEER_EXTERNAL_EVENTS_MODULE_PATH}';

import { inject, injectable } from 'inversify';
import { EventBusServer } from '{EVENT_BUS_SPEC_PATH}';
import { HandleExternalEvent } from '{EVENTS_SPEC_PATH}';
import { ServerSideController } from '{CONTROLLER_SPEC_PATH}';

@injectable()
export class NewController extends ServerSideController {
    constructor(@inject(EventBusServer) eventBus: EventBusServer) {
        super(eventBus);
    }
}
";

pub(super) const CLIENT_MODULE: &str = "import { createClientSideModule } from '{MODULE_SPEC_PATH}';

export const NewModule = createClientSideModule({
\tcontrollers: [],
\tmanagers: [],
});
";

pub(super) const INTERNAL_EVENT: &str = "import { InternalEvent } from '{EVENTS_SPEC_PATH}';

export class NewEvent extends InternalEvent {
}
";

pub(super) const EXTERNAL_EVENT: &str = "import { ExternalEvent } from '{EVENTS_SPEC_PATH}';

export class NewEvent extends ExternalEvent {
}
";

pub(super) const EXTENDED_EXTERNAL_EVENT: &str = "import * as InternalEvents from '{INTERNAL_EVENTS_MODULE_PATH}';

export class NewEvent extends InternalEvents.BaseEvent {
}
";
